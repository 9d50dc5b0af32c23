//! Game script → modifier translation
//!
//! ## Adherence blending
//! `final = fixed * adherence + (1.0 - adherence)`, per axis.
//! - adherence 0.0: every axis is exactly 1.0 (script ignored)
//! - adherence 1.0: the fixed table value
//!
//! Tempo is NOT blended: it is a step function gated at [`TEMPO_ADHERENCE_GATE`].

use super::{GameScript, Tempo};
use crate::models::{CoverageScheme, OffensiveFormation};
use serde::{Deserialize, Serialize};

/// Minimum adherence for a tempo recommendation
pub const TEMPO_ADHERENCE_GATE: f32 = 0.5;
/// Prevent-usage trait must exceed this (strictly) to call prevent
pub const PREVENT_USAGE_THRESHOLD: f32 = 0.4;

/// Blend a fixed multiplier toward neutral by `adherence` (clamped to 0..=1)
pub fn blend(fixed: f32, adherence: f32) -> f32 {
    let adherence = adherence.clamp(0.0, 1.0);
    // both endpoints land exactly on 1.0 and `fixed`
    fixed * adherence + (1.0 - adherence)
}

/// Tempo for `script`, or `None` when adherence is below the gate
pub fn tempo_recommendation(script: GameScript, adherence: f32) -> Option<Tempo> {
    if adherence >= TEMPO_ADHERENCE_GATE {
        Some(script.tempo())
    } else {
        None
    }
}

/// Offensive multipliers for one decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierBundle {
    pub script: GameScript,
    pub adherence: f32,
    pub run_weight: f32,
    pub pass_weight: f32,
    /// Blended weights for formations the script lists; anything else is 1.0
    pub formation_weights: Vec<(OffensiveFormation, f32)>,
    pub tempo: Option<Tempo>,
}

impl Default for ModifierBundle {
    fn default() -> Self {
        Self::neutral()
    }
}

impl ModifierBundle {
    /// All axes 1.0, no tempo opinion
    pub fn neutral() -> Self {
        modifier_bundle(GameScript::Competitive, 0.0)
    }

    pub fn formation_weight(&self, formation: OffensiveFormation) -> f32 {
        self.formation_weights
            .iter()
            .find(|(f, _)| *f == formation)
            .map(|(_, w)| *w)
            .unwrap_or(1.0)
    }
}

/// Build the blended bundle for `script` at `adherence`
pub fn modifier_bundle(script: GameScript, adherence: f32) -> ModifierBundle {
    ModifierBundle {
        script,
        adherence,
        run_weight: blend(script.run_weight(), adherence),
        pass_weight: blend(script.pass_weight(), adherence),
        formation_weights: script
            .formation_weights()
            .iter()
            .map(|(f, w)| (*f, blend(*w, adherence)))
            .collect(),
        tempo: tempo_recommendation(script, adherence),
    }
}

/// What a defense should do given the opponent's inferred script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefensiveResponse {
    pub use_prevent_defense: bool,
    pub coverage_adjustment: Option<CoverageScheme>,
    /// `None` = no opinion on pressure
    pub send_pressure: Option<bool>,
}

impl DefensiveResponse {
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Coverage the kernel should see for this response, falling back to the
    /// caller's own call when the response has no adjustment.
    pub fn coverage_or(&self, called: Option<CoverageScheme>) -> Option<CoverageScheme> {
        self.coverage_adjustment.or(called)
    }
}

/// Defensive response to `opponent_script`, given the defense's prevent-usage trait
pub fn defensive_response(opponent_script: GameScript, prevent_usage: f32) -> DefensiveResponse {
    match opponent_script {
        GameScript::Desperation if prevent_usage > PREVENT_USAGE_THRESHOLD => DefensiveResponse {
            use_prevent_defense: true,
            coverage_adjustment: Some(CoverageScheme::Prevent),
            send_pressure: Some(false),
        },
        GameScript::Desperation => DefensiveResponse {
            use_prevent_defense: false,
            coverage_adjustment: Some(CoverageScheme::Cover3),
            send_pressure: Some(false),
        },
        _ => DefensiveResponse::neutral(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_zero_adherence_is_neutral_on_every_axis() {
        for script in GameScript::ALL {
            let b = modifier_bundle(script, 0.0);
            assert_eq!(b.run_weight, 1.0);
            assert_eq!(b.pass_weight, 1.0);
            for f in OffensiveFormation::ALL {
                assert_eq!(b.formation_weight(f), 1.0, "{script} {f}");
            }
        }
    }

    #[test]
    fn test_full_adherence_returns_table_values() {
        for script in GameScript::ALL {
            let b = modifier_bundle(script, 1.0);
            assert_eq!(b.run_weight, script.run_weight(), "{script}");
            assert_eq!(b.pass_weight, script.pass_weight(), "{script}");
            for f in OffensiveFormation::ALL {
                assert_eq!(b.formation_weight(f), script.formation_weight(f), "{script} {f}");
            }
        }
    }

    #[test]
    fn test_blend_is_per_axis() {
        let b = modifier_bundle(GameScript::ControlGame, 0.5);
        assert!((b.run_weight - 1.5).abs() < EPS);
        assert!((b.pass_weight - 0.85).abs() < EPS);
        assert!((b.formation_weight(OffensiveFormation::Shotgun) - 0.75).abs() < EPS);
        assert!((b.formation_weight(OffensiveFormation::Empty) - 0.7).abs() < EPS);
    }

    #[test]
    fn test_tempo_gate_is_a_step() {
        let script = GameScript::Desperation;
        for adherence in [0.0, 0.25, 0.49, 0.4999] {
            assert_eq!(tempo_recommendation(script, adherence), None);
        }
        for adherence in [0.5, 0.51, 0.75, 1.0] {
            assert_eq!(tempo_recommendation(script, adherence), Some(Tempo::HurryUp));
        }
        assert_eq!(modifier_bundle(GameScript::ControlGame, 0.5).tempo, Some(Tempo::Slow));
        assert_eq!(modifier_bundle(GameScript::ControlGame, 0.49).tempo, None);
    }

    #[test]
    fn test_prevent_threshold_exact_boundary() {
        let at = defensive_response(GameScript::Desperation, 0.40);
        assert!(!at.use_prevent_defense);
        assert_eq!(at.coverage_adjustment, Some(CoverageScheme::Cover3));
        assert_eq!(at.send_pressure, Some(false));

        let above = defensive_response(GameScript::Desperation, 0.41);
        assert!(above.use_prevent_defense);
        assert_eq!(above.coverage_adjustment, Some(CoverageScheme::Prevent));
    }

    #[test]
    fn test_non_desperation_is_neutral() {
        for script in GameScript::ALL {
            if script == GameScript::Desperation {
                continue;
            }
            let r = defensive_response(script, 1.0);
            assert_eq!(r, DefensiveResponse::neutral());
            assert_eq!(r.send_pressure, None);
        }
    }

    #[test]
    fn test_coverage_or_prefers_adjustment() {
        let r = defensive_response(GameScript::Desperation, 0.9);
        assert_eq!(r.coverage_or(Some(CoverageScheme::Cover1)), Some(CoverageScheme::Prevent));
        let n = DefensiveResponse::neutral();
        assert_eq!(n.coverage_or(Some(CoverageScheme::Cover1)), Some(CoverageScheme::Cover1));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: blended weights lie between neutral and the table value
            #[test]
            fn prop_blend_between_neutral_and_fixed(
                idx in 0usize..5,
                adherence in 0.0f32..=1.0f32
            ) {
                let script = GameScript::ALL[idx];
                let b = modifier_bundle(script, adherence);
                let (lo, hi) = if script.run_weight() < 1.0 {
                    (script.run_weight(), 1.0)
                } else {
                    (1.0, script.run_weight())
                };
                prop_assert!(b.run_weight >= lo - EPS && b.run_weight <= hi + EPS);
            }
        }
    }
}
