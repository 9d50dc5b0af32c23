//! Run-play resolution
//!
//! Baseline lookup → rating tiers → momentum → script → prevent, then a single
//! normal draw for yardage. Randomness is drawn up front into [`RunRolls`] and
//! the rest is a pure function of the context and the rolls.

use super::attribution::{attribute_run, RunAttribution};
use super::baseline::BaselineTable;
use super::config::{KernelConfig, RunConfig};
use super::modifiers::{compose_run_parameters, run_rating_modifiers, RunParameters};
use super::penalty::{PenaltyRequest, PenaltyService};
use super::PlayContext;
use crate::models::{PlayOutcome, PlayResolution, PlayType};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::trace;

/// Random values consumed by one run play, in draw order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunRolls {
    /// Raw normal sample, before the floor clamp
    pub yards_sample: f32,
    pub fumble_roll: f32,
    /// Dead-ball time in `[min_seconds, max_seconds]`
    pub base_seconds: f32,
}

impl RunRolls {
    pub fn draw<R: Rng + ?Sized>(params: &RunParameters, cfg: &RunConfig, rng: &mut R) -> Self {
        let yards_sample = match Normal::new(params.mean_yards, params.variance.max(0.0).sqrt()) {
            Ok(dist) => dist.sample(rng),
            Err(_) => params.mean_yards,
        };
        let fumble_roll = rng.gen::<f32>();
        let base_seconds = if cfg.max_seconds > cfg.min_seconds {
            rng.gen_range(cfg.min_seconds..=cfg.max_seconds)
        } else {
            cfg.min_seconds
        };
        Self { yards_sample, fumble_roll, base_seconds }
    }

    /// Floor-clamped at zero, truncated
    pub fn yards(&self) -> i32 {
        self.yards_sample.max(0.0) as i32
    }
}

/// Composed parameters for a run under `ctx`, with no randomness
pub fn run_parameters(
    ctx: &PlayContext<'_>,
    config: &KernelConfig,
    baselines: &BaselineTable,
) -> RunParameters {
    let baseline = baselines.run(ctx.offensive_formation, ctx.defensive_formation);
    let ratings = run_rating_modifiers(ctx.offense, ctx.defense, &config.ratings);
    compose_run_parameters(
        baseline,
        ratings,
        ctx.momentum_modifier,
        ctx.script,
        ctx.offensive_formation,
        ctx.coverage,
        &config.run,
    )
}

pub fn resolve_run<R, P>(
    ctx: &PlayContext<'_>,
    config: &KernelConfig,
    baselines: &BaselineTable,
    penalties: &P,
    rng: &mut R,
) -> PlayResolution
where
    R: Rng,
    P: PenaltyService + ?Sized,
{
    let params = run_parameters(ctx, config, baselines);
    let rolls = RunRolls::draw(&params, &config.run, rng);

    let yards = rolls.yards();
    let fumble = rolls.fumble_roll < config.run.fumble_rate;
    let elapsed_seconds = rolls.base_seconds + config.run.seconds_per_yard * yards as f32;

    trace!(
        offense = %ctx.offensive_formation,
        defense = %ctx.defensive_formation,
        mean = params.mean_yards,
        variance = params.variance,
        rating = params.rating_multiplier,
        prevent = params.prevent,
        yards,
        "run play sampled"
    );

    let request = PenaltyRequest {
        offense: ctx.offense,
        defense: ctx.defense,
        play_type: PlayType::Run,
        offensive_formation: ctx.offensive_formation,
        defensive_formation: ctx.defensive_formation,
        yards,
    };
    let verdict = penalties.evaluate(&request, &mut *rng);
    let final_yards = verdict.modified_yards;
    let turnover = fumble && !verdict.play_negated;

    let stats = attribute_run(
        ctx.offense,
        ctx.defense,
        RunAttribution {
            carrier: ctx.offense.ball_carrier(),
            final_yards,
            fumble_lost: turnover,
        },
        &config.blocking,
        &config.tackling,
        rng,
    );

    PlayResolution {
        outcome: PlayOutcome {
            play_type: PlayType::Run,
            yards: final_yards,
            elapsed_seconds,
            turnover,
            penalty: verdict.annotate(yards),
            pass: None,
        },
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::penalty::{NoPenalties, PenaltyVerdict};
    use crate::models::{
        CoverageScheme, DefensiveFormation, OffensiveFormation, Position, Roster, RosterPlayer,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sides() -> (Roster, Roster) {
        let offense = Roster::new(vec![
            RosterPlayer::new(1, "QB", Position::QB, 75),
            RosterPlayer::new(2, "RB", Position::RB, 75),
            RosterPlayer::new(3, "LT", Position::OT, 75),
            RosterPlayer::new(4, "LG", Position::OG, 75),
            RosterPlayer::new(5, "C", Position::C, 75),
        ]);
        let defense = Roster::new(vec![
            RosterPlayer::new(10, "LB1", Position::LB, 75),
            RosterPlayer::new(11, "LB2", Position::LB, 75),
            RosterPlayer::new(12, "LB3", Position::LB, 75),
            RosterPlayer::new(13, "SS", Position::S, 75),
        ]);
        (offense, defense)
    }

    #[test]
    fn test_yards_floor_clamped_and_truncated() {
        let rolls = RunRolls { yards_sample: -2.7, fumble_roll: 0.5, base_seconds: 5.0 };
        assert_eq!(rolls.yards(), 0);
        let rolls = RunRolls { yards_sample: 6.9, ..rolls };
        assert_eq!(rolls.yards(), 6);
    }

    #[test]
    fn test_first_draw_is_yardage() {
        let (o, d) = sides();
        let ctx = PlayContext::new(&o, &d, OffensiveFormation::SingleBack, DefensiveFormation::Base43);
        let config = KernelConfig::default();
        let baselines = BaselineTable::standard();
        let params = run_parameters(&ctx, &config, baselines);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let res = resolve_run(&ctx, &config, baselines, &NoPenalties, &mut rng);

        let mut replay = ChaCha8Rng::seed_from_u64(42);
        let dist = Normal::new(params.mean_yards, params.variance.sqrt()).unwrap();
        let expected = dist.sample(&mut replay).max(0.0) as i32;
        assert_eq!(res.outcome.penalty.original_yards, expected);
        assert_eq!(res.outcome.yards, expected);
    }

    #[test]
    fn test_verdict_copied_verbatim() {
        let (o, d) = sides();
        let ctx = PlayContext::new(&o, &d, OffensiveFormation::SingleBack, DefensiveFormation::Base43);
        let stub = |_: &PenaltyRequest<'_>| PenaltyVerdict {
            penalty_occurred: true,
            modified_yards: -10,
            play_negated: true,
            detail: None,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let res = resolve_run(&ctx, &KernelConfig::default(), BaselineTable::standard(), &stub, &mut rng);
        assert_eq!(res.outcome.yards, -10);
        assert!(res.outcome.penalty.occurred);
        assert!(res.outcome.penalty.play_negated);
        assert!(!res.outcome.turnover);
        let rb = res.stats_for(crate::models::PlayerId(2)).unwrap();
        assert_eq!(rb.rushing_yards, -10);
    }

    #[test]
    fn test_prevent_raises_mean() {
        let (o, d) = sides();
        let config = KernelConfig::default();
        let base = PlayContext::new(&o, &d, OffensiveFormation::SingleBack, DefensiveFormation::Dime);
        let prevent = base.clone().with_coverage(CoverageScheme::Prevent);
        let a = run_parameters(&base, &config, BaselineTable::standard());
        let b = run_parameters(&prevent, &config, BaselineTable::standard());
        assert!((b.mean_yards - a.mean_yards - 1.0).abs() < 1e-5);
        assert!((b.variance - a.variance * 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_elapsed_time_within_bounds() {
        let (o, d) = sides();
        let ctx = PlayContext::new(&o, &d, OffensiveFormation::IFormation, DefensiveFormation::Base34);
        let config = KernelConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let res = resolve_run(&ctx, &config, BaselineTable::standard(), &NoPenalties, &mut rng);
            let floor = config.run.min_seconds;
            let ceil = config.run.max_seconds + config.run.seconds_per_yard * res.outcome.yards as f32;
            assert!(res.outcome.elapsed_seconds >= floor && res.outcome.elapsed_seconds <= ceil + 1e-4);
            assert!(res.outcome.yards >= 0);
        }
    }
}
