//! Team Momentum
//!
//! Per-team, per-game psychological momentum driven by discrete play events
//! and a per-play multiplicative decay.
//!
//! - Value range: -20.0 (collapse) to +20.0 (rolling), neutral 0.0
//! - Every mutation re-clamps; anything within 0.1 of zero snaps to 0.0
//! - The orchestrator applies a play's events first, then calls [`MomentumState::decay`]
//!
//! The kernel never holds a `MomentumState`; it receives
//! [`MomentumState::performance_modifier`] as a plain value.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const MOMENTUM_MIN: f32 = -20.0;
pub const MOMENTUM_MAX: f32 = 20.0;
/// Fraction of momentum lost per resolved play
pub const DECAY_RATE: f32 = 0.10;
/// Magnitudes below this snap to exactly zero
pub const SNAP_THRESHOLD: f32 = 0.1;

/// Events that move a team's momentum, from that team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumEvent {
    Touchdown,
    TurnoverGained,
    TurnoverLost,
    BigPlay,
    FourthDownConversion,
    FourthDownStop,
    FieldGoalMade,
    FieldGoalBlocked,
    /// Defense recorded a sack
    Sack,
    /// Offense went three-and-out
    ThreeAndOut,
    /// Defense scored a safety
    Safety,
    BlockedPunt,
}

impl MomentumEvent {
    pub const ALL: [MomentumEvent; 12] = [
        Self::Touchdown,
        Self::TurnoverGained,
        Self::TurnoverLost,
        Self::BigPlay,
        Self::FourthDownConversion,
        Self::FourthDownStop,
        Self::FieldGoalMade,
        Self::FieldGoalBlocked,
        Self::Sack,
        Self::ThreeAndOut,
        Self::Safety,
        Self::BlockedPunt,
    ];

    /// Signed momentum delta for this event
    pub const fn delta(&self) -> f32 {
        match self {
            Self::Touchdown => 10.0,
            Self::TurnoverGained => 8.0,
            Self::TurnoverLost => -8.0,
            Self::BigPlay => 5.0,
            Self::FourthDownConversion => 6.0,
            Self::FourthDownStop => 7.0,
            Self::FieldGoalMade => 3.0,
            Self::FieldGoalBlocked => 7.0,
            Self::Sack => 4.0,
            Self::ThreeAndOut => -4.0,
            Self::Safety => 8.0,
            Self::BlockedPunt => 9.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Touchdown => "touchdown",
            Self::TurnoverGained => "turnover_gained",
            Self::TurnoverLost => "turnover_lost",
            Self::BigPlay => "big_play",
            Self::FourthDownConversion => "fourth_down_conversion",
            Self::FourthDownStop => "fourth_down_stop",
            Self::FieldGoalMade => "field_goal_made",
            Self::FieldGoalBlocked => "field_goal_blocked",
            Self::Sack => "sack",
            Self::ThreeAndOut => "three_and_out",
            Self::Safety => "safety",
            Self::BlockedPunt => "blocked_punt",
        }
    }
}

impl FromStr for MomentumEvent {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| CoreError::unknown_label("momentum event", s))
    }
}

impl fmt::Display for MomentumEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display band for a momentum value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MomentumLevel {
    Hot,
    Warm,
    #[default]
    Neutral,
    Cool,
    Cold,
}

/// Momentum for one team in one game.
///
/// Serializes as its value only; deserializing clamps and snaps like any
/// other mutation and restores the fixed decay rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "MomentumSnapshot", into = "MomentumSnapshot")]
pub struct MomentumState {
    value: f32,
    decay_rate: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MomentumSnapshot {
    value: f32,
}

impl From<MomentumSnapshot> for MomentumState {
    fn from(snapshot: MomentumSnapshot) -> Self {
        Self::with_value(snapshot.value)
    }
}

impl From<MomentumState> for MomentumSnapshot {
    fn from(state: MomentumState) -> Self {
        Self { value: state.value }
    }
}

impl Default for MomentumState {
    fn default() -> Self {
        Self { value: 0.0, decay_rate: DECAY_RATE }
    }
}

impl MomentumState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Momentum at a specific value (clamped and snapped like any mutation)
    #[doc(hidden)]
    pub fn with_value(value: f32) -> Self {
        let mut m = Self { value, ..Self::default() };
        m.normalize();
        m
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }

    /// Apply the fixed delta for `event`
    pub fn add_event(&mut self, event: MomentumEvent) {
        self.value += event.delta();
        self.normalize();
    }

    /// Apply an event by its label; unknown labels are ignored.
    pub fn add_event_named(&mut self, name: &str) {
        match name.parse::<MomentumEvent>() {
            Ok(event) => self.add_event(event),
            Err(_) => debug!(event = name, "ignoring unknown momentum event"),
        }
    }

    /// Per-play decay. Call once per resolved play, after that play's events.
    pub fn decay(&mut self) {
        self.value *= 1.0 - self.decay_rate;
        self.normalize();
    }

    /// Back to neutral for a new game
    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Multiplier for offensive success quantities, 0.95..=1.05
    pub fn performance_modifier(&self) -> f32 {
        1.0 + self.value / 400.0
    }

    /// Multiplier for coaching aggressiveness, 0.85..=1.15
    pub fn aggression_modifier(&self) -> f32 {
        1.0 + self.value * 0.0075
    }

    pub fn level(&self) -> MomentumLevel {
        if self.value >= 12.0 {
            MomentumLevel::Hot
        } else if self.value >= 6.0 {
            MomentumLevel::Warm
        } else if self.value <= -12.0 {
            MomentumLevel::Cold
        } else if self.value <= -6.0 {
            MomentumLevel::Cool
        } else {
            MomentumLevel::Neutral
        }
    }

    fn normalize(&mut self) {
        self.value = self.value.clamp(MOMENTUM_MIN, MOMENTUM_MAX);
        if self.value.abs() < SNAP_THRESHOLD {
            self.value = 0.0;
        }
    }
}
