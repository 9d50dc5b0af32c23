use super::policy::{defensive_response, modifier_bundle, DefensiveResponse, ModifierBundle};
use super::GameScript;
use crate::momentum::MomentumState;
use serde::{Deserialize, Serialize};

/// Coaching traits that shape how strictly a staff follows its game script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoachingPersona {
    /// How strictly the script is followed (0.0-1.0)
    pub adherence: f32,
    /// Willingness to sit back in prevent against a desperate offense (0.0-1.0)
    pub prevent_defense_usage: f32,
    /// Baseline fourth-down / two-point aggressiveness (0.0-1.0)
    pub base_aggression: f32,
}

impl Default for CoachingPersona {
    fn default() -> Self {
        Self { adherence: 0.5, prevent_defense_usage: 0.5, base_aggression: 0.5 }
    }
}

impl CoachingPersona {
    pub fn new(adherence: f32, prevent_defense_usage: f32, base_aggression: f32) -> Self {
        Self {
            adherence: adherence.clamp(0.0, 1.0),
            prevent_defense_usage: prevent_defense_usage.clamp(0.0, 1.0),
            base_aggression: base_aggression.clamp(0.0, 1.0),
        }
    }

    pub fn offensive_bundle(&self, script: GameScript) -> ModifierBundle {
        modifier_bundle(script, self.adherence)
    }

    pub fn defensive_response(&self, opponent_script: GameScript) -> DefensiveResponse {
        defensive_response(opponent_script, self.prevent_defense_usage)
    }

    /// Aggressiveness after momentum, clamped to 0.0-1.0
    pub fn effective_aggression(&self, momentum: &MomentumState) -> f32 {
        (self.base_aggression * momentum.aggression_modifier()).clamp(0.0, 1.0)
    }
}
