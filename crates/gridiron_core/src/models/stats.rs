//! Per-player, per-play stat rows

use super::player::{PlayerId, Position, RosterPlayer};
use serde::{Deserialize, Serialize};

/// Everything one player accrued on one play.
///
/// Rows where every counter is zero are never emitted; see [`StatSheet::into_records`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    pub player_id: PlayerId,
    pub position: Position,

    // Rushing
    pub carries: u16,
    pub rushing_yards: i32,
    pub fumbles_lost: u16,

    // Blocking
    pub blocks_attempted: u16,
    pub blocks_won: u16,

    // Tackling
    pub tackles_solo: u16,
    pub tackles_assisted: u16,
    pub forced_fumbles: u16,

    // Passing
    pub pass_attempts: u16,
    pub completions: u16,
    pub passing_yards: i32,
    pub interceptions_thrown: u16,
    pub times_sacked: u16,
    pub sack_yards_lost: i32,

    // Receiving
    pub targets: u16,
    pub receptions: u16,
    pub receiving_yards: i32,
    pub yards_after_catch: i32,

    // Pass defense
    pub sacks: u16,
    pub qb_pressures: u16,
    pub interceptions: u16,
    pub passes_defended: u16,
}

impl PlayerStatRecord {
    pub fn new(player_id: PlayerId, position: Position) -> Self {
        Self {
            player_id,
            position,
            carries: 0,
            rushing_yards: 0,
            fumbles_lost: 0,
            blocks_attempted: 0,
            blocks_won: 0,
            tackles_solo: 0,
            tackles_assisted: 0,
            forced_fumbles: 0,
            pass_attempts: 0,
            completions: 0,
            passing_yards: 0,
            interceptions_thrown: 0,
            times_sacked: 0,
            sack_yards_lost: 0,
            targets: 0,
            receptions: 0,
            receiving_yards: 0,
            yards_after_catch: 0,
            sacks: 0,
            qb_pressures: 0,
            interceptions: 0,
            passes_defended: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.carries == 0
            && self.rushing_yards == 0
            && self.fumbles_lost == 0
            && self.blocks_attempted == 0
            && self.blocks_won == 0
            && self.tackles_solo == 0
            && self.tackles_assisted == 0
            && self.forced_fumbles == 0
            && self.pass_attempts == 0
            && self.completions == 0
            && self.passing_yards == 0
            && self.interceptions_thrown == 0
            && self.times_sacked == 0
            && self.sack_yards_lost == 0
            && self.targets == 0
            && self.receptions == 0
            && self.receiving_yards == 0
            && self.yards_after_catch == 0
            && self.sacks == 0
            && self.qb_pressures == 0
            && self.interceptions == 0
            && self.passes_defended == 0
    }

    pub fn total_tackles(&self) -> u16 {
        self.tackles_solo + self.tackles_assisted
    }
}

/// Collects stat rows for one play, one row per player, in first-touched order.
#[derive(Debug, Clone, Default)]
pub struct StatSheet {
    rows: Vec<PlayerStatRecord>,
}

impl StatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row for `player`, created on first touch
    pub fn entry(&mut self, player: &RosterPlayer) -> &mut PlayerStatRecord {
        let idx = match self.rows.iter().position(|r| r.player_id == player.id) {
            Some(idx) => idx,
            None => {
                self.rows.push(PlayerStatRecord::new(player.id, player.position));
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx]
    }

    /// Rows with at least one non-zero stat
    pub fn into_records(self) -> Vec<PlayerStatRecord> {
        self.rows.into_iter().filter(|r| !r.is_empty()).collect()
    }
}
