//! Stat attribution
//!
//! Spreads one resolved play over the players involved. Always works from the
//! final (post-penalty) yardage. A position group that is missing from a
//! roster skips its category; nothing here fails.

use super::config::{BlockingConfig, PassConfig, TacklingConfig};
use crate::models::{
    PassDetail, PassResult, PlayerStatRecord, Position, Roster, RosterPlayer, StatSheet,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Run-play attribution inputs
#[derive(Debug, Clone, Copy)]
pub struct RunAttribution<'a> {
    pub carrier: Option<&'a RosterPlayer>,
    pub final_yards: i32,
    pub fumble_lost: bool,
}

/// Pass-play attribution inputs
#[derive(Debug, Clone, Copy)]
pub struct PassAttribution<'a> {
    pub quarterback: Option<&'a RosterPlayer>,
    pub target: Option<&'a RosterPlayer>,
    pub detail: &'a PassDetail,
    pub final_yards: i32,
}

pub fn attribute_run<R: Rng + ?Sized>(
    offense: &Roster,
    defense: &Roster,
    play: RunAttribution<'_>,
    blocking: &BlockingConfig,
    tackling: &TacklingConfig,
    rng: &mut R,
) -> Vec<PlayerStatRecord> {
    let mut sheet = StatSheet::new();

    match play.carrier {
        Some(carrier) => {
            let row = sheet.entry(carrier);
            row.carries += 1;
            row.rushing_yards += play.final_yards;
            if play.fumble_lost {
                row.fumbles_lost += 1;
            }
        }
        None => debug!("no ball carrier on offense, skipping rushing credit"),
    }

    credit_blocks(&mut sheet, offense, play.final_yards, blocking, rng);

    let primary = credit_tackles(
        &mut sheet,
        defense,
        &Position::RUN_TACKLERS,
        play.final_yards,
        tackling,
        rng,
    );
    if play.fumble_lost {
        if let Some(tackler) = primary {
            sheet.entry(tackler).forced_fumbles += 1;
        }
    }

    sheet.into_records()
}

pub fn attribute_pass<R: Rng + ?Sized>(
    defense: &Roster,
    play: PassAttribution<'_>,
    pass: &PassConfig,
    tackling: &TacklingConfig,
    rng: &mut R,
) -> Vec<PlayerStatRecord> {
    let mut sheet = StatSheet::new();
    let result = play.detail.result;

    match play.quarterback {
        Some(qb) => {
            let row = sheet.entry(qb);
            if result.is_attempt() {
                row.pass_attempts += 1;
            }
            match result {
                PassResult::Completion => {
                    row.completions += 1;
                    row.passing_yards += play.final_yards;
                }
                PassResult::Interception => row.interceptions_thrown += 1,
                PassResult::Sack => {
                    row.times_sacked += 1;
                    row.sack_yards_lost += (-play.final_yards).max(0);
                }
                PassResult::Incompletion | PassResult::Deflection => {}
            }
        }
        None => debug!("no quarterback on offense, skipping passing credit"),
    }

    if result.is_attempt() {
        if let Some(target) = play.target {
            let row = sheet.entry(target);
            row.targets += 1;
            if result.is_completion() {
                row.receptions += 1;
                row.receiving_yards += play.final_yards;
                row.yards_after_catch += play.detail.yards_after_catch;
            }
        }
    }

    match result {
        PassResult::Sack => {
            if let Some(rusher) = pick_rusher(defense, pass.edge_sack_weight, rng) {
                sheet.entry(rusher).sacks += 1;
            }
        }
        _ if play.detail.pressured => {
            if let Some(rusher) = pick_rusher(defense, pass.edge_sack_weight, rng) {
                sheet.entry(rusher).qb_pressures += 1;
            }
        }
        _ => {}
    }

    match result {
        PassResult::Interception => {
            if let Some(defender) = pick_from(defense, &Position::COVERAGE, rng) {
                let row = sheet.entry(defender);
                row.interceptions += 1;
                row.passes_defended += 1;
            }
        }
        PassResult::Deflection => {
            if let Some(defender) = pick_from(defense, &Position::COVERAGE, rng) {
                sheet.entry(defender).passes_defended += 1;
            }
        }
        PassResult::Completion => {
            credit_tackles(
                &mut sheet,
                defense,
                &Position::PASS_TACKLERS,
                play.final_yards,
                tackling,
                rng,
            );
        }
        PassResult::Incompletion | PassResult::Sack => {}
    }

    sheet.into_records()
}

// ============================================================================
// Helpers
// ============================================================================

/// 2-3 linemen (configurable) each get an attempt and win with a
/// yardage-scaled probability.
fn credit_blocks<R: Rng + ?Sized>(
    sheet: &mut StatSheet,
    offense: &Roster,
    final_yards: i32,
    cfg: &BlockingConfig,
    rng: &mut R,
) {
    let linemen: Vec<&RosterPlayer> = offense.at(&Position::OFFENSIVE_LINE).collect();
    if linemen.is_empty() {
        debug!("no offensive linemen, skipping block credit");
        return;
    }

    let count = rng.gen_range(cfg.blocker_range()).min(linemen.len());
    let success = cfg.success_rate(final_yards);
    for blocker in linemen.choose_multiple(rng, count) {
        let won = rng.gen::<f32>() < success;
        let row = sheet.entry(blocker);
        row.blocks_attempted += 1;
        if won {
            row.blocks_won += 1;
        }
    }
}

/// One solo tackle; long gains may add an assisting second tackler.
///
/// Returns the primary tackler.
fn credit_tackles<'a, R: Rng + ?Sized>(
    sheet: &mut StatSheet,
    defense: &'a Roster,
    positions: &'a [Position],
    final_yards: i32,
    cfg: &TacklingConfig,
    rng: &mut R,
) -> Option<&'a RosterPlayer> {
    let pool: Vec<&RosterPlayer> = defense.at(positions).collect();
    let Some(&primary) = pool.choose(rng) else {
        debug!(?positions, "no eligible tacklers, skipping tackle credit");
        return None;
    };
    sheet.entry(primary).tackles_solo += 1;

    if final_yards >= cfg.long_run_threshold
        && pool.len() > 1
        && rng.gen::<f32>() < cfg.assist_probability
    {
        let others: Vec<&RosterPlayer> =
            pool.iter().copied().filter(|p| p.id != primary.id).collect();
        if let Some(&assist) = others.choose(rng) {
            sheet.entry(assist).tackles_assisted += 1;
        }
    }

    Some(primary)
}

/// Edge rushers weighted above interior linemen and linebackers
fn pick_rusher<'a, R: Rng + ?Sized>(
    defense: &'a Roster,
    edge_weight: f32,
    rng: &mut R,
) -> Option<&'a RosterPlayer> {
    let pool: Vec<&RosterPlayer> = defense.at(&Position::PASS_RUSHERS).collect();
    let picked = pool
        .choose_weighted(rng, |p| if p.position == Position::DE { edge_weight } else { 1.0 })
        .ok()
        .copied();
    if picked.is_none() {
        debug!("no pass rushers, skipping pass-rush credit");
    }
    picked
}

fn pick_from<'a, R: Rng + ?Sized>(
    defense: &'a Roster,
    positions: &'a [Position],
    rng: &mut R,
) -> Option<&'a RosterPlayer> {
    let pool: Vec<&RosterPlayer> = defense.at(positions).collect();
    let picked = pool.choose(rng).copied();
    if picked.is_none() {
        debug!(?positions, "no eligible defenders, skipping coverage credit");
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn offense() -> Roster {
        Roster::new(vec![
            RosterPlayer::new(1, "QB", Position::QB, 80),
            RosterPlayer::new(2, "RB", Position::RB, 75),
            RosterPlayer::new(3, "WR", Position::WR, 78),
            RosterPlayer::new(4, "LT", Position::OT, 74),
            RosterPlayer::new(5, "LG", Position::OG, 72),
            RosterPlayer::new(6, "C", Position::C, 73),
            RosterPlayer::new(7, "RG", Position::OG, 71),
            RosterPlayer::new(8, "RT", Position::OT, 70),
        ])
    }

    fn defense() -> Roster {
        Roster::new(vec![
            RosterPlayer::new(20, "DE", Position::DE, 80),
            RosterPlayer::new(21, "DT", Position::DT, 76),
            RosterPlayer::new(22, "MLB", Position::LB, 77),
            RosterPlayer::new(23, "OLB", Position::LB, 74),
            RosterPlayer::new(24, "CB", Position::CB, 79),
            RosterPlayer::new(25, "FS", Position::S, 75),
        ])
    }

    fn run(yards: i32, fumble: bool, seed: u64) -> Vec<PlayerStatRecord> {
        let o = offense();
        let d = defense();
        let carrier = o.ball_carrier();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        attribute_run(
            &o,
            &d,
            RunAttribution { carrier, final_yards: yards, fumble_lost: fumble },
            &BlockingConfig::default(),
            &TacklingConfig::default(),
            &mut rng,
        )
    }

    #[test]
    fn test_carrier_gets_final_yards() {
        let rows = run(3, false, 7);
        let rb = rows.iter().find(|r| r.player_id == PlayerId(2)).unwrap();
        assert_eq!(rb.carries, 1);
        assert_eq!(rb.rushing_yards, 3);
    }

    #[test]
    fn test_two_or_three_blockers() {
        for seed in 0..50 {
            let rows = run(4, false, seed);
            let blockers = rows.iter().filter(|r| r.blocks_attempted > 0).count();
            assert!((2..=3).contains(&blockers), "seed {seed}: {blockers}");
            assert!(rows.iter().all(|r| r.blocks_won <= r.blocks_attempted));
        }
    }

    #[test]
    fn test_short_run_has_single_solo_tackler() {
        for seed in 0..50 {
            let rows = run(2, false, seed);
            let solo: u16 = rows.iter().map(|r| r.tackles_solo).sum();
            let assisted: u16 = rows.iter().map(|r| r.tackles_assisted).sum();
            assert_eq!((solo, assisted), (1, 0));
            let tackler = rows.iter().find(|r| r.tackles_solo == 1).unwrap();
            assert!(matches!(tackler.position, Position::LB | Position::S));
        }
    }

    #[test]
    fn test_long_run_sometimes_assisted() {
        let assisted = (0..200)
            .filter(|seed| run(12, false, *seed).iter().any(|r| r.tackles_assisted == 1))
            .count();
        // 60% nominal
        assert!((80..=160).contains(&assisted), "{assisted}");
    }

    #[test]
    fn test_fumble_credits_carrier_and_tackler() {
        let rows = run(1, true, 3);
        assert_eq!(rows.iter().find(|r| r.player_id == PlayerId(2)).unwrap().fumbles_lost, 1);
        let forced: u16 = rows.iter().map(|r| r.forced_fumbles).sum();
        assert_eq!(forced, 1);
    }

    #[test]
    fn test_missing_groups_skip_categories() {
        let o = Roster::new(vec![RosterPlayer::new(2, "RB", Position::RB, 75)]);
        let d = Roster::new(vec![RosterPlayer::new(24, "CB", Position::CB, 79)]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let rows = attribute_run(
            &o,
            &d,
            RunAttribution { carrier: o.ball_carrier(), final_yards: 6, fumble_lost: false },
            &BlockingConfig::default(),
            &TacklingConfig::default(),
            &mut rng,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].carries, 1);
    }

    fn pass(result: PassResult, pressured: bool, yards: i32) -> Vec<PlayerStatRecord> {
        let o = offense();
        let d = defense();
        let detail = PassDetail {
            result,
            target: Some(PlayerId(3)),
            air_yards: 8,
            yards_after_catch: 4,
            time_to_throw: 2.6,
            pressured,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        attribute_pass(
            &d,
            PassAttribution {
                quarterback: o.quarterback(),
                target: o.get(PlayerId(3)),
                detail: &detail,
                final_yards: yards,
            },
            &PassConfig::default(),
            &TacklingConfig::default(),
            &mut rng,
        )
    }

    #[test]
    fn test_completion_credits_qb_receiver_and_tackler() {
        let rows = pass(PassResult::Completion, false, 12);
        let qb = rows.iter().find(|r| r.player_id == PlayerId(1)).unwrap();
        assert_eq!((qb.pass_attempts, qb.completions, qb.passing_yards), (1, 1, 12));
        let wr = rows.iter().find(|r| r.player_id == PlayerId(3)).unwrap();
        assert_eq!((wr.targets, wr.receptions, wr.receiving_yards), (1, 1, 12));
        assert_eq!(wr.yards_after_catch, 4);
        assert!(rows.iter().map(|r| r.tackles_solo).sum::<u16>() == 1);
    }

    #[test]
    fn test_sack_is_not_an_attempt() {
        let rows = pass(PassResult::Sack, true, -7);
        let qb = rows.iter().find(|r| r.player_id == PlayerId(1)).unwrap();
        assert_eq!(qb.pass_attempts, 0);
        assert_eq!((qb.times_sacked, qb.sack_yards_lost), (1, 7));
        assert!(rows.iter().all(|r| r.targets == 0));
        let sacker = rows.iter().find(|r| r.sacks == 1).unwrap();
        assert!(matches!(sacker.position, Position::DE | Position::DT | Position::LB));
        assert!(rows.iter().all(|r| r.qb_pressures == 0));
    }

    #[test]
    fn test_interception_credits_coverage() {
        let rows = pass(PassResult::Interception, true, 0);
        let qb = rows.iter().find(|r| r.player_id == PlayerId(1)).unwrap();
        assert_eq!(qb.interceptions_thrown, 1);
        let dbs: Vec<_> = rows.iter().filter(|r| r.interceptions == 1).collect();
        assert_eq!(dbs.len(), 1);
        assert_eq!(dbs[0].passes_defended, 1);
        assert!(matches!(dbs[0].position, Position::CB | Position::S));
        assert_eq!(rows.iter().map(|r| r.qb_pressures).sum::<u16>(), 1);
    }

    #[test]
    fn test_incompletion_targets_without_catch() {
        let rows = pass(PassResult::Incompletion, false, 0);
        let wr = rows.iter().find(|r| r.player_id == PlayerId(3)).unwrap();
        assert_eq!((wr.targets, wr.receptions), (1, 0));
        assert_eq!(rows.iter().map(|r| r.total_tackles()).sum::<u16>(), 0);
    }
}
