//! # gridiron_core - American Football Play-Resolution Kernel
//!
//! Resolves single plays for a season-management game: two formations, two
//! rosters and a stack of contextual modifiers in, one play outcome and its
//! per-player stat rows out.
//!
//! ## Features
//! - Deterministic under a seeded RNG (same seed = same play)
//! - Momentum model with bounded, decaying swings
//! - Game-script policy blended by coach adherence
//! - Fixed modifier composition order: ratings, momentum, script, prevent
//! - Injected penalty service

pub mod calibration;
pub mod error;
pub mod game_script;
pub mod kernel;
pub mod models;
pub mod momentum;

pub use error::{CoreError, Result};

// Re-export kernel entry points
pub use kernel::{
    BaselineTable, KernelConfig, NoPenalties, PenaltyRequest, PenaltyService, PenaltyVerdict,
    PlayContext, PlayResolver,
};

// Re-export modifier sources
pub use game_script::{
    CoachingPersona, DefensiveResponse, GameScript, GameSituation, ModifierBundle, Tempo,
};
pub use momentum::{MomentumEvent, MomentumLevel, MomentumState};

// Re-export data model
pub use models::{
    CoverageScheme, DefensiveFormation, OffensiveFormation, PlayOutcome, PlayResolution, PlayType,
    PlayerStatRecord, Position, Roster, RosterPlayer,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
