//! Play Resolution Kernel
//!
//! Resolves one play into a [`PlayOutcome`](crate::models::PlayOutcome) and the
//! per-player stat rows it produced. Stateless: momentum and script state are
//! read through their modifier values and never mutated here.
//!
//! ## Usage
//! ```
//! use gridiron_core::kernel::{BaselineTable, KernelConfig, NoPenalties, PlayContext, PlayResolver};
//! use gridiron_core::models::{DefensiveFormation, OffensiveFormation, PlayType, Roster};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let offense = Roster::default();
//! let defense = Roster::default();
//! let config = KernelConfig::default();
//! let resolver = PlayResolver::new(&config, BaselineTable::standard(), &NoPenalties);
//! let ctx = PlayContext::new(&offense, &defense, OffensiveFormation::Shotgun, DefensiveFormation::Nickel);
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let play = resolver.resolve(PlayType::Run, &ctx, &mut rng);
//! assert!(play.outcome.yards >= 0);
//! ```

pub mod attribution;
pub mod baseline;
pub mod config;
pub mod modifiers;
pub mod pass_play;
pub mod penalty;
pub mod run_play;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use baseline::{BaselineTable, PassBaseline, RunBaseline};
pub use config::KernelConfig;
pub use modifiers::{PassParameters, RunParameters};
pub use penalty::{NoPenalties, PenaltyRequest, PenaltyService, PenaltyVerdict};

use crate::game_script::{DefensiveResponse, ModifierBundle};
use crate::models::{
    CoverageScheme, DefensiveFormation, OffensiveFormation, PlayResolution, PlayType, Roster,
};
use once_cell::sync::Lazy;
use rand::Rng;

static NEUTRAL_BUNDLE: Lazy<ModifierBundle> = Lazy::new(ModifierBundle::neutral);

/// Everything about one snap that the caller has already decided
#[derive(Debug, Clone)]
pub struct PlayContext<'a> {
    pub offense: &'a Roster,
    pub defense: &'a Roster,
    pub offensive_formation: OffensiveFormation,
    pub defensive_formation: DefensiveFormation,
    /// Called coverage; only an exact `Prevent` triggers the prevent concessions
    pub coverage: Option<CoverageScheme>,
    /// Offense's `MomentumState::performance_modifier()`
    pub momentum_modifier: f32,
    pub script: &'a ModifierBundle,
}

impl<'a> PlayContext<'a> {
    /// Neutral momentum and script, no called coverage
    pub fn new(
        offense: &'a Roster,
        defense: &'a Roster,
        offensive_formation: OffensiveFormation,
        defensive_formation: DefensiveFormation,
    ) -> Self {
        Self {
            offense,
            defense,
            offensive_formation,
            defensive_formation,
            coverage: None,
            momentum_modifier: 1.0,
            script: &NEUTRAL_BUNDLE,
        }
    }

    pub fn with_coverage(mut self, coverage: CoverageScheme) -> Self {
        self.coverage = Some(coverage);
        self
    }

    /// Coverage override from the defense's game-script response, if any
    pub fn with_defensive_response(mut self, response: &DefensiveResponse) -> Self {
        self.coverage = response.coverage_or(self.coverage);
        self
    }

    pub fn with_momentum(mut self, performance_modifier: f32) -> Self {
        self.momentum_modifier = performance_modifier;
        self
    }

    pub fn with_script(mut self, script: &'a ModifierBundle) -> Self {
        self.script = script;
        self
    }
}

/// Kernel entry point: read-only configuration, baselines and penalty service.
///
/// Holds no per-game state and can be shared across threads when the penalty
/// service can.
pub struct PlayResolver<'a, P: PenaltyService + ?Sized> {
    config: &'a KernelConfig,
    baselines: &'a BaselineTable,
    penalties: &'a P,
}

impl<'a, P: PenaltyService + ?Sized> PlayResolver<'a, P> {
    pub fn new(config: &'a KernelConfig, baselines: &'a BaselineTable, penalties: &'a P) -> Self {
        Self { config, baselines, penalties }
    }

    pub fn config(&self) -> &KernelConfig {
        self.config
    }

    pub fn resolve<R: Rng>(
        &self,
        play_type: PlayType,
        ctx: &PlayContext<'_>,
        rng: &mut R,
    ) -> PlayResolution {
        match play_type {
            PlayType::Run => self.resolve_run(ctx, rng),
            PlayType::Pass => self.resolve_pass(ctx, rng),
        }
    }

    pub fn resolve_run<R: Rng>(&self, ctx: &PlayContext<'_>, rng: &mut R) -> PlayResolution {
        run_play::resolve_run(ctx, self.config, self.baselines, self.penalties, rng)
    }

    pub fn resolve_pass<R: Rng>(&self, ctx: &PlayContext<'_>, rng: &mut R) -> PlayResolution {
        pass_play::resolve_pass(ctx, self.config, self.baselines, self.penalties, rng)
    }
}
