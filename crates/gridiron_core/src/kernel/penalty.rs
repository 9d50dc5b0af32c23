//! Penalty verdict seam.
//!
//! Penalty determination lives outside the kernel. The kernel hands over the
//! pre-penalty yardage and takes the verdict as final without checking it.

use crate::models::{DefensiveFormation, OffensiveFormation, PenaltyAnnotation, PlayType, Roster};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// What the penalty service sees for one play
#[derive(Debug, Clone, Copy)]
pub struct PenaltyRequest<'a> {
    pub offense: &'a Roster,
    pub defense: &'a Roster,
    pub play_type: PlayType,
    pub offensive_formation: OffensiveFormation,
    pub defensive_formation: DefensiveFormation,
    /// Yardage before any penalty
    pub yards: i32,
}

/// Verdict returned by a [`PenaltyService`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyVerdict {
    pub penalty_occurred: bool,
    pub modified_yards: i32,
    pub play_negated: bool,
    /// Opaque to the kernel; carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl PenaltyVerdict {
    /// No flag; yardage stands
    pub fn clean(yards: i32) -> Self {
        Self { penalty_occurred: false, modified_yards: yards, play_negated: false, detail: None }
    }

    pub(crate) fn annotate(self, original_yards: i32) -> PenaltyAnnotation {
        PenaltyAnnotation {
            occurred: self.penalty_occurred,
            original_yards,
            final_yards: self.modified_yards,
            play_negated: self.play_negated,
            detail: self.detail,
        }
    }
}

/// External penalty engine.
///
/// Implementations receive the play's own RNG so a seeded game stays
/// reproducible end to end.
pub trait PenaltyService {
    fn evaluate(&self, request: &PenaltyRequest<'_>, rng: &mut dyn RngCore) -> PenaltyVerdict;
}

/// Never throws a flag
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPenalties;

impl PenaltyService for NoPenalties {
    fn evaluate(&self, request: &PenaltyRequest<'_>, _rng: &mut dyn RngCore) -> PenaltyVerdict {
        PenaltyVerdict::clean(request.yards)
    }
}

/// Closures work as stub services in tests and tools
impl<F> PenaltyService for F
where
    F: Fn(&PenaltyRequest<'_>) -> PenaltyVerdict,
{
    fn evaluate(&self, request: &PenaltyRequest<'_>, _rng: &mut dyn RngCore) -> PenaltyVerdict {
        self(request)
    }
}
