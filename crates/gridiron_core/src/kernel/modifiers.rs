//! Modifier Composition
//!
//! Pure functions that turn a baseline plus the contextual modifiers into the
//! final sampling parameters. No randomness here.
//!
//! ## Run composition order
//! 1. `rating = offense / defense` (tiered ratings)
//! 2. `mean *= rating`, `variance *= min(rating, cap)`
//! 3. `mean *= momentum`, then `*= script run weight`, then `*= formation weight`
//! 4. Prevent (exact match): `mean += bonus`, `variance *= prevent multiplier`
//!
//! Pass composition follows the same order on the completion-rate axis.

use super::baseline::{PassBaseline, RunBaseline};
use super::config::{clamp_between, PassConfig, RatingConfig, RunConfig};
use crate::game_script::ModifierBundle;
use crate::models::{CoverageScheme, OffensiveFormation, Position, Roster, RosterPlayer};

/// Prevent concessions only apply on an exact match of the coverage label
pub fn is_prevent(coverage: Option<CoverageScheme>) -> bool {
    coverage == Some(CoverageScheme::Prevent)
}

// ============================================================================
// Rating modifiers
// ============================================================================

/// Tiered rating multipliers for a run play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunRatingModifiers {
    /// From the ball carrier
    pub offense: f32,
    /// From the run-stopping linebackers' average
    pub defense: f32,
}

impl RunRatingModifiers {
    pub fn neutral() -> Self {
        Self { offense: 1.0, defense: 1.0 }
    }

    pub fn multiplier(&self) -> f32 {
        self.offense / self.defense
    }
}

/// Missing position groups rate as neutral (1.0)
pub fn run_rating_modifiers(
    offense: &Roster,
    defense: &Roster,
    ratings: &RatingConfig,
) -> RunRatingModifiers {
    let offense_mod = offense
        .ball_carrier()
        .map(|p| ratings.offense.modifier(p.overall as f32))
        .unwrap_or(1.0);
    let defense_mod = defense
        .top_average(&Position::RUN_STOPPERS, ratings.run_stoppers)
        .map(|avg| ratings.defense.modifier(avg))
        .unwrap_or(1.0);
    RunRatingModifiers { offense: offense_mod, defense: defense_mod }
}

/// Tiered rating multipliers for a pass play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassRatingModifiers {
    pub quarterback: f32,
    pub receiver: f32,
    pub pass_rush: f32,
    pub coverage: f32,
}

impl PassRatingModifiers {
    pub fn neutral() -> Self {
        Self { quarterback: 1.0, receiver: 1.0, pass_rush: 1.0, coverage: 1.0 }
    }

    /// Passer and target averaged
    pub fn offense(&self) -> f32 {
        (self.quarterback + self.receiver) / 2.0
    }
}

pub fn pass_rating_modifiers(
    offense: &Roster,
    defense: &Roster,
    target: Option<&RosterPlayer>,
    ratings: &RatingConfig,
) -> PassRatingModifiers {
    let quarterback = offense
        .quarterback()
        .map(|p| ratings.offense.modifier(p.overall as f32))
        .unwrap_or(1.0);
    let receiver = target.map(|p| ratings.offense.modifier(p.overall as f32)).unwrap_or(1.0);
    let pass_rush = defense
        .top_average(&Position::DEFENSIVE_LINE, ratings.pass_rushers)
        .map(|avg| ratings.defense.modifier(avg))
        .unwrap_or(1.0);
    let coverage = defense
        .top_average(&Position::COVERAGE, ratings.coverage_defenders)
        .map(|avg| ratings.defense.modifier(avg))
        .unwrap_or(1.0);
    PassRatingModifiers { quarterback, receiver, pass_rush, coverage }
}

// ============================================================================
// Run parameters
// ============================================================================

/// Final run-play sampling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    pub mean_yards: f32,
    pub variance: f32,
    pub rating_multiplier: f32,
    pub prevent: bool,
}

pub fn compose_run_parameters(
    baseline: RunBaseline,
    ratings: RunRatingModifiers,
    momentum_modifier: f32,
    script: &ModifierBundle,
    formation: OffensiveFormation,
    coverage: Option<CoverageScheme>,
    cfg: &RunConfig,
) -> RunParameters {
    let rating_multiplier = ratings.multiplier();

    let mut mean = baseline.mean_yards * rating_multiplier;
    let mut variance = baseline.variance * rating_multiplier.min(cfg.variance_multiplier_cap);

    // mean only; variance stays as rated
    mean *= momentum_modifier;
    mean *= script.run_weight;
    mean *= script.formation_weight(formation);

    let prevent = is_prevent(coverage);
    if prevent {
        mean += cfg.prevent_mean_bonus;
        variance *= cfg.prevent_variance_multiplier;
    }

    RunParameters { mean_yards: mean, variance, rating_multiplier, prevent }
}

// ============================================================================
// Pass parameters
// ============================================================================

/// Final pass-play rates and means
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassParameters {
    pub completion_rate: f32,
    pub sack_rate: f32,
    pub pressure_rate: f32,
    pub deflection_rate: f32,
    pub interception_rate: f32,
    pub mean_air_yards: f32,
    pub mean_yards_after_catch: f32,
    pub mean_time_to_throw: f32,
    pub prevent: bool,
}

pub fn compose_pass_parameters(
    baseline: PassBaseline,
    ratings: PassRatingModifiers,
    momentum_modifier: f32,
    script: &ModifierBundle,
    formation: OffensiveFormation,
    coverage: Option<CoverageScheme>,
    cfg: &PassConfig,
) -> PassParameters {
    let mut completion = baseline.completion_rate * ratings.offense() / ratings.coverage;
    completion *= momentum_modifier;
    completion *= script.pass_weight;
    completion *= script.formation_weight(formation);

    let mut sack = baseline.sack_rate * ratings.pass_rush / ratings.quarterback;

    let prevent = is_prevent(coverage);
    if prevent {
        completion += cfg.prevent_completion_bonus;
        sack *= 1.0 - cfg.prevent_sack_reduction;
    }

    PassParameters {
        completion_rate: clamp_between(
            completion,
            cfg.min_completion_rate,
            cfg.max_completion_rate,
        ),
        sack_rate: sack.clamp(0.0, 0.5),
        pressure_rate: (baseline.pressure_rate * ratings.pass_rush / ratings.quarterback)
            .clamp(0.0, 0.9),
        deflection_rate: (baseline.deflection_rate * ratings.coverage).clamp(0.0, 0.3),
        interception_rate: (baseline.interception_rate * ratings.coverage / ratings.quarterback)
            .clamp(0.0, 0.3),
        mean_air_yards: baseline.mean_air_yards,
        mean_yards_after_catch: (baseline.mean_yards_after_catch * ratings.receiver
            / ratings.coverage)
            .max(0.0),
        mean_time_to_throw: baseline.mean_time_to_throw,
        prevent,
    }
}
