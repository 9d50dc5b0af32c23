//! Calibration sampling
//!
//! Resolves many plays for one matchup and summarises the outcome distribution
//! so it can be checked against league targets. Every seed gets its own
//! `ChaCha8Rng`; no stream is shared between threads.

use crate::kernel::{PenaltyService, PlayContext, PlayResolver};
use crate::models::{PassResult, PlayOutcome, PlayType};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Below this many seeds the batch runs on the calling thread
const PARALLEL_MIN_SEEDS: usize = 8;

/// Aggregate statistics over a batch of resolved plays
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaySampleSummary {
    pub plays: usize,
    pub mean_yards: f64,
    /// Population variance of final yards
    pub yards_variance: f64,
    /// Completions per attempt (sacks excluded)
    pub completion_rate: f64,
    /// Sacks per dropback
    pub sack_rate: f64,
    /// Interceptions per attempt
    pub interception_rate: f64,
    pub penalty_rate: f64,
    pub turnover_rate: f64,
}

impl PlaySampleSummary {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a PlayOutcome>) -> Self {
        outcomes
            .into_iter()
            .fold(Tally::default(), |mut t, o| {
                t.record(o);
                t
            })
            .summary()
    }
}

/// Running sums; merged across threads before the summary is taken
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    plays: usize,
    yards: f64,
    yards_sq: f64,
    dropbacks: usize,
    attempts: usize,
    completions: usize,
    sacks: usize,
    interceptions: usize,
    penalties: usize,
    turnovers: usize,
}

impl Tally {
    fn record(&mut self, outcome: &PlayOutcome) {
        let y = outcome.yards as f64;
        self.plays += 1;
        self.yards += y;
        self.yards_sq += y * y;
        if outcome.penalty.occurred {
            self.penalties += 1;
        }
        if outcome.turnover {
            self.turnovers += 1;
        }
        if let Some(result) = outcome.pass_result() {
            self.dropbacks += 1;
            if result.is_attempt() {
                self.attempts += 1;
            }
            match result {
                PassResult::Completion => self.completions += 1,
                PassResult::Sack => self.sacks += 1,
                PassResult::Interception => self.interceptions += 1,
                PassResult::Incompletion | PassResult::Deflection => {}
            }
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            plays: self.plays + other.plays,
            yards: self.yards + other.yards,
            yards_sq: self.yards_sq + other.yards_sq,
            dropbacks: self.dropbacks + other.dropbacks,
            attempts: self.attempts + other.attempts,
            completions: self.completions + other.completions,
            sacks: self.sacks + other.sacks,
            interceptions: self.interceptions + other.interceptions,
            penalties: self.penalties + other.penalties,
            turnovers: self.turnovers + other.turnovers,
        }
    }

    fn summary(&self) -> PlaySampleSummary {
        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
        let n = self.plays as f64;
        let (mean, variance) = if self.plays == 0 {
            (0.0, 0.0)
        } else {
            let mean = self.yards / n;
            (mean, (self.yards_sq / n - mean * mean).max(0.0))
        };
        PlaySampleSummary {
            plays: self.plays,
            mean_yards: mean,
            yards_variance: variance,
            completion_rate: ratio(self.completions, self.attempts),
            sack_rate: ratio(self.sacks, self.dropbacks),
            interception_rate: ratio(self.interceptions, self.attempts),
            penalty_rate: ratio(self.penalties, self.plays),
            turnover_rate: ratio(self.turnovers, self.plays),
        }
    }
}

fn run_seed<P>(
    resolver: &PlayResolver<'_, P>,
    play_type: PlayType,
    ctx: &PlayContext<'_>,
    seed: u64,
    plays_per_seed: usize,
) -> Tally
where
    P: PenaltyService + ?Sized,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tally = Tally::default();
    for _ in 0..plays_per_seed {
        tally.record(&resolver.resolve(play_type, ctx, &mut rng).outcome);
    }
    tally
}

/// Resolve `plays_per_seed` plays of `play_type` for every seed and summarise.
///
/// Results depend only on the seeds, not on thread scheduling.
pub fn sample_plays<P>(
    resolver: &PlayResolver<'_, P>,
    play_type: PlayType,
    ctx: &PlayContext<'_>,
    seeds: &[u64],
    plays_per_seed: usize,
) -> PlaySampleSummary
where
    P: PenaltyService + Sync + ?Sized,
{
    let tally = if seeds.len() >= PARALLEL_MIN_SEEDS {
        seeds
            .par_iter()
            .map(|&seed| run_seed(resolver, play_type, ctx, seed, plays_per_seed))
            .reduce(Tally::default, Tally::merge)
    } else {
        seeds
            .iter()
            .map(|&seed| run_seed(resolver, play_type, ctx, seed, plays_per_seed))
            .fold(Tally::default(), Tally::merge)
    };
    tally.summary()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{BaselineTable, KernelConfig, NoPenalties, PenaltyRequest, PenaltyVerdict};
    use crate::models::{DefensiveFormation, OffensiveFormation, Position, Roster, RosterPlayer};

    fn average_roster(positions: &[Position], first_id: u32) -> Roster {
        Roster::new(
            positions
                .iter()
                .enumerate()
                .map(|(i, p)| RosterPlayer::new(first_id + i as u32, p.as_str(), *p, 75))
                .collect(),
        )
    }

    #[test]
    fn test_summary_of_known_outcomes() {
        use crate::models::{PassDetail, PenaltyAnnotation};
        let run = |yards| PlayOutcome {
            play_type: PlayType::Run,
            yards,
            elapsed_seconds: 5.0,
            turnover: false,
            penalty: PenaltyAnnotation::default(),
            pass: None,
        };
        let sack = PlayOutcome {
            play_type: PlayType::Pass,
            yards: -6,
            elapsed_seconds: 3.0,
            turnover: false,
            penalty: PenaltyAnnotation::default(),
            pass: Some(PassDetail {
                result: PassResult::Sack,
                target: None,
                air_yards: 0,
                yards_after_catch: 0,
                time_to_throw: 3.0,
                pressured: true,
            }),
        };
        let outcomes = vec![run(2), run(4), sack];
        let s = PlaySampleSummary::from_outcomes(&outcomes);
        assert_eq!(s.plays, 3);
        assert!((s.mean_yards - 0.0).abs() < 1e-9);
        assert!((s.yards_variance - 56.0 / 3.0).abs() < 1e-9);
        assert_eq!(s.sack_rate, 1.0);
        assert_eq!(s.completion_rate, 0.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let offense = average_roster(
            &[Position::QB, Position::RB, Position::WR, Position::OT, Position::OG, Position::C],
            1,
        );
        let defense = average_roster(&[Position::LB, Position::LB, Position::LB, Position::S], 20);
        let config = KernelConfig::default();
        let resolver = PlayResolver::new(&config, BaselineTable::standard(), &NoPenalties);
        let ctx = PlayContext::new(&offense, &defense, OffensiveFormation::SingleBack, DefensiveFormation::Base43);

        let seeds: Vec<u64> = (0..16).collect();
        let parallel = sample_plays(&resolver, PlayType::Run, &ctx, &seeds, 25);

        let sequential = seeds
            .iter()
            .map(|&s| run_seed(&resolver, PlayType::Run, &ctx, s, 25))
            .fold(Tally::default(), Tally::merge)
            .summary();

        assert_eq!(parallel.plays, 400);
        assert_eq!(parallel.plays, sequential.plays);
        assert!((parallel.mean_yards - sequential.mean_yards).abs() < 1e-9);
        assert!((parallel.yards_variance - sequential.yards_variance).abs() < 1e-6);
    }

    #[test]
    fn test_neutral_run_mean_tracks_baseline() {
        let offense = average_roster(&[Position::RB, Position::OT, Position::OG, Position::C], 1);
        let defense = average_roster(&[Position::LB, Position::LB, Position::LB, Position::S], 20);
        let config = KernelConfig::default();
        let baselines = BaselineTable::standard();
        let resolver = PlayResolver::new(&config, baselines, &NoPenalties);
        let ctx = PlayContext::new(&offense, &defense, OffensiveFormation::Pistol, DefensiveFormation::Base34);

        let seeds: Vec<u64> = (100..132).collect();
        let summary = sample_plays(&resolver, PlayType::Run, &ctx, &seeds, 250);
        let mean = baselines.run(OffensiveFormation::Pistol, DefensiveFormation::Base34).mean_yards as f64;
        // floor clamp and truncation pull the sample mean below the normal mean
        assert!(summary.mean_yards < mean);
        assert!(summary.mean_yards > mean - 1.5, "{} vs {}", summary.mean_yards, mean);
    }

    #[test]
    fn test_penalty_rate_counts_flags() {
        let r = Roster::default();
        let config = KernelConfig::default();
        let flag_every_play = |req: &PenaltyRequest<'_>| PenaltyVerdict {
            penalty_occurred: true,
            modified_yards: req.yards,
            play_negated: false,
            detail: None,
        };
        let resolver = PlayResolver::new(&config, BaselineTable::standard(), &flag_every_play);
        let ctx = PlayContext::new(&r, &r, OffensiveFormation::Shotgun, DefensiveFormation::Nickel);
        let summary = sample_plays(&resolver, PlayType::Pass, &ctx, &[1, 2, 3], 10);
        assert_eq!(summary.plays, 30);
        assert_eq!(summary.penalty_rate, 1.0);
    }
}
