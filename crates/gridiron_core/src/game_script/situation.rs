//! Score/clock situation → game script

use super::GameScript;
use serde::{Deserialize, Serialize};

/// Seconds in a regulation quarter
pub const QUARTER_SECONDS: u32 = 900;
/// "Two-minute drill" window generalised to the last five minutes
const LATE_WINDOW_SECONDS: u32 = 300;
/// More than one score
const TWO_SCORES: i32 = 9;
/// More than two scores
const THREE_SCORES: i32 = 17;

/// Game state from one team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSituation {
    /// Own score minus opponent score
    pub score_differential: i32,
    /// 1-4, 5+ for overtime
    pub quarter: u8,
    pub seconds_remaining_in_quarter: u32,
}

impl Default for GameSituation {
    fn default() -> Self {
        Self { score_differential: 0, quarter: 1, seconds_remaining_in_quarter: QUARTER_SECONDS }
    }
}

impl GameSituation {
    pub fn new(score_differential: i32, quarter: u8, seconds_remaining_in_quarter: u32) -> Self {
        Self { score_differential, quarter, seconds_remaining_in_quarter }
    }

    pub fn is_second_half(&self) -> bool {
        self.quarter >= 3
    }

    pub fn is_fourth_quarter(&self) -> bool {
        self.quarter >= 4
    }

    /// Last five minutes of the fourth quarter (or overtime)
    pub fn is_late(&self) -> bool {
        self.is_fourth_quarter() && self.seconds_remaining_in_quarter <= LATE_WINDOW_SECONDS
    }

    pub fn script(&self) -> GameScript {
        let diff = self.score_differential;
        if diff < 0 {
            let deficit = -diff;
            if self.is_fourth_quarter()
                && (deficit >= THREE_SCORES || (deficit >= TWO_SCORES && self.is_late()))
            {
                GameScript::Desperation
            } else if (self.is_second_half() && deficit >= TWO_SCORES) || self.is_late() {
                GameScript::ComebackMode
            } else {
                GameScript::Competitive
            }
        } else if diff > 0 {
            if self.is_second_half() && diff >= THREE_SCORES {
                GameScript::ControlGame
            } else if (self.is_second_half() && diff >= TWO_SCORES) || self.is_late() {
                GameScript::ProtectLead
            } else {
                GameScript::Competitive
            }
        } else {
            GameScript::Competitive
        }
    }

    /// Same moment seen from the other sideline
    pub fn for_opponent(&self) -> Self {
        Self { score_differential: -self.score_differential, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_half_is_competitive() {
        assert_eq!(GameSituation::new(-20, 2, 100).script(), GameScript::Competitive);
        assert_eq!(GameSituation::new(24, 1, 600).script(), GameScript::Competitive);
    }

    #[test]
    fn test_trailing_scripts() {
        assert_eq!(GameSituation::new(-10, 3, 600).script(), GameScript::ComebackMode);
        assert_eq!(GameSituation::new(-3, 4, 200).script(), GameScript::ComebackMode);
        assert_eq!(GameSituation::new(-10, 4, 280).script(), GameScript::Desperation);
        assert_eq!(GameSituation::new(-17, 4, 800).script(), GameScript::Desperation);
        assert_eq!(GameSituation::new(-10, 4, 600).script(), GameScript::ComebackMode);
        assert_eq!(GameSituation::new(-3, 4, 600).script(), GameScript::Competitive);
    }

    #[test]
    fn test_leading_scripts() {
        assert_eq!(GameSituation::new(21, 3, 600).script(), GameScript::ControlGame);
        assert_eq!(GameSituation::new(10, 3, 600).script(), GameScript::ProtectLead);
        assert_eq!(GameSituation::new(3, 4, 120).script(), GameScript::ProtectLead);
        assert_eq!(GameSituation::new(3, 4, 600).script(), GameScript::Competitive);
    }

    #[test]
    fn test_opponent_view_mirrors_script() {
        let s = GameSituation::new(-10, 4, 200);
        assert_eq!(s.script(), GameScript::Desperation);
        assert_eq!(s.for_opponent().script(), GameScript::ProtectLead);
    }

    #[test]
    fn test_tied_is_competitive() {
        assert_eq!(GameSituation::new(0, 4, 10).script(), GameScript::Competitive);
    }
}
