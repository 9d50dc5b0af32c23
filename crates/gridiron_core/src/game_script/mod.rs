//! Game Script System
//!
//! Coarse situational modes (protecting a lead, desperate to score, ...) and
//! the policy that turns a mode plus a coach's adherence into multipliers.
//!
//! - [`GameScript`]: the five situational variants and their fixed tables
//! - [`policy`]: adherence blending, tempo gate, defensive response
//! - [`situation`]: inferring a script from score and clock
//! - [`persona`]: a coach's adherence/prevent/aggression traits

pub mod persona;
pub mod policy;
pub mod situation;

pub use persona::CoachingPersona;
pub use policy::{
    blend, defensive_response, modifier_bundle, tempo_recommendation, DefensiveResponse,
    ModifierBundle, PREVENT_USAGE_THRESHOLD, TEMPO_ADHERENCE_GATE,
};
pub use situation::GameSituation;

use crate::error::{CoreError, Result};
use crate::models::OffensiveFormation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Situational mode, inferred from score differential and game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameScript {
    /// Comfortable lead: run the ball, burn clock
    ControlGame,
    ProtectLead,
    #[default]
    Competitive,
    ComebackMode,
    /// Late and far behind: throw on every down
    Desperation,
}

impl GameScript {
    pub const ALL: [GameScript; 5] = [
        Self::ControlGame,
        Self::ProtectLead,
        Self::Competitive,
        Self::ComebackMode,
        Self::Desperation,
    ];

    /// Fixed (unblended) run-axis weight
    pub const fn run_weight(&self) -> f32 {
        match self {
            Self::ControlGame => 2.0,
            Self::ProtectLead => 1.3,
            Self::Competitive => 1.0,
            Self::ComebackMode => 0.6,
            Self::Desperation => 0.25,
        }
    }

    /// Fixed (unblended) pass-axis weight
    pub const fn pass_weight(&self) -> f32 {
        match self {
            Self::ControlGame => 0.7,
            Self::ProtectLead => 0.85,
            Self::Competitive => 1.0,
            Self::ComebackMode => 1.4,
            Self::Desperation => 1.75,
        }
    }

    /// Fixed (unblended) formation weights. Unlisted formations are 1.0.
    pub fn formation_weights(&self) -> &'static [(OffensiveFormation, f32)] {
        use OffensiveFormation::*;
        match self {
            Self::ControlGame => &[(IFormation, 2.0), (Shotgun, 0.5), (Empty, 0.4)],
            Self::ProtectLead => &[(IFormation, 1.5), (GoalLine, 1.3), (Empty, 0.6)],
            Self::Competitive => &[],
            Self::ComebackMode => &[(Shotgun, 1.6), (Empty, 1.4), (IFormation, 0.6)],
            Self::Desperation => &[(Shotgun, 2.5), (Empty, 2.0), (IFormation, 0.3)],
        }
    }

    /// Fixed formation weight for one formation
    pub fn formation_weight(&self, formation: OffensiveFormation) -> f32 {
        self.formation_weights()
            .iter()
            .find(|(f, _)| *f == formation)
            .map(|(_, w)| *w)
            .unwrap_or(1.0)
    }

    pub const fn tempo(&self) -> Tempo {
        match self {
            Self::ControlGame | Self::ProtectLead => Tempo::Slow,
            Self::Competitive => Tempo::Normal,
            Self::ComebackMode | Self::Desperation => Tempo::HurryUp,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ControlGame => "CONTROL_GAME",
            Self::ProtectLead => "PROTECT_LEAD",
            Self::Competitive => "COMPETITIVE",
            Self::ComebackMode => "COMEBACK_MODE",
            Self::Desperation => "DESPERATION",
        }
    }
}

impl FromStr for GameScript {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| CoreError::unknown_label("game script", s))
    }
}

impl fmt::Display for GameScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offensive tempo token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    Slow,
    Normal,
    HurryUp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitive_is_neutral() {
        let s = GameScript::Competitive;
        assert_eq!(s.run_weight(), 1.0);
        assert_eq!(s.pass_weight(), 1.0);
        assert!(s.formation_weights().is_empty());
        assert_eq!(s.tempo(), Tempo::Normal);
    }

    #[test]
    fn test_desperation_inverts_control_game_formations() {
        use OffensiveFormation::*;
        let control = GameScript::ControlGame;
        let desperation = GameScript::Desperation;
        assert!(control.formation_weight(IFormation) > 1.0);
        assert!(desperation.formation_weight(IFormation) < 1.0);
        for f in [Shotgun, Empty] {
            assert!(f.is_spread());
            assert!(control.formation_weight(f) < 1.0);
            assert!(desperation.formation_weight(f) > 1.0);
        }
        assert_eq!(control.formation_weight(SingleBack), 1.0);
    }

    #[test]
    fn test_only_competitive_has_empty_formation_table() {
        for s in GameScript::ALL {
            assert_eq!(s.formation_weights().is_empty(), s == GameScript::Competitive);
        }
    }

    #[test]
    fn test_script_labels() {
        assert_eq!("DESPERATION".parse::<GameScript>().unwrap(), GameScript::Desperation);
        assert!("desperation".parse::<GameScript>().is_err());
        let json = serde_json::to_string(&GameScript::ComebackMode).unwrap();
        assert_eq!(json, "\"COMEBACK_MODE\"");
    }
}
