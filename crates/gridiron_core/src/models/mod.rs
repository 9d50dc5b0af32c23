//! Shared data model: formations, rosters, play outcomes and stat rows.

pub mod formation;
pub mod outcome;
pub mod player;
pub mod stats;

pub use formation::{CoverageScheme, DefensiveFormation, OffensiveFormation, PlayType};
pub use outcome::{PassDetail, PassResult, PenaltyAnnotation, PlayOutcome, PlayResolution};
pub use player::{PlayerId, Position, Roster, RosterPlayer, PLAYERS_ON_FIELD};
pub use stats::{PlayerStatRecord, StatSheet};
