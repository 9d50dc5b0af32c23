use super::formation::PlayType;
use super::player::PlayerId;
use super::stats::PlayerStatRecord;
use serde::{Deserialize, Serialize};

/// Discrete result of a pass play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassResult {
    Completion,
    Incompletion,
    Sack,
    Interception,
    /// Ball batted or broken up by a defender (incomplete)
    Deflection,
}

impl PassResult {
    pub fn is_completion(&self) -> bool {
        matches!(self, Self::Completion)
    }

    /// Counts as a pass attempt in the box score (sacks do not)
    pub fn is_attempt(&self) -> bool {
        !matches!(self, Self::Sack)
    }
}

/// Continuous quantities sampled for a pass play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassDetail {
    pub result: PassResult,
    pub target: Option<PlayerId>,
    pub air_yards: i32,
    pub yards_after_catch: i32,
    pub time_to_throw: f32,
    pub pressured: bool,
}

/// Penalty annotations, copied verbatim from the penalty verdict
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PenaltyAnnotation {
    pub occurred: bool,
    /// Yardage the play produced before the penalty verdict
    pub original_yards: i32,
    /// Yardage after the verdict (what the play is scored as)
    pub final_yards: i32,
    pub play_negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

/// Result of resolving one play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub play_type: PlayType,
    /// Final yards gained (post-penalty)
    pub yards: i32,
    pub elapsed_seconds: f32,
    /// Possession changed on the play (interception or lost fumble)
    pub turnover: bool,
    pub penalty: PenaltyAnnotation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<PassDetail>,
}

impl PlayOutcome {
    pub fn pass_result(&self) -> Option<PassResult> {
        self.pass.map(|p| p.result)
    }
}

/// Outcome plus the per-player stat rows attributed from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResolution {
    pub outcome: PlayOutcome,
    pub stats: Vec<PlayerStatRecord>,
}

impl PlayResolution {
    pub fn stats_for(&self, id: PlayerId) -> Option<&PlayerStatRecord> {
        self.stats.iter().find(|s| s.player_id == id)
    }
}
