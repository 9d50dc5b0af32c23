//! Formation, coverage and play-type labels.
//!
//! Every label parses from an exact, case-sensitive string. Baseline tables and
//! script policies key on these enums instead of free-form strings.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Offensive personnel/alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffensiveFormation {
    /// Under-center, fullback and tailback stacked (balanced power look)
    IFormation,
    SingleBack,
    Pistol,
    /// Spread, QB in the gun
    Shotgun,
    /// Spread, no backs
    Empty,
    GoalLine,
}

impl OffensiveFormation {
    pub const ALL: [OffensiveFormation; 6] = [
        Self::IFormation,
        Self::SingleBack,
        Self::Pistol,
        Self::Shotgun,
        Self::Empty,
        Self::GoalLine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IFormation => "i_formation",
            Self::SingleBack => "single_back",
            Self::Pistol => "pistol",
            Self::Shotgun => "shotgun",
            Self::Empty => "empty",
            Self::GoalLine => "goal_line",
        }
    }

    /// Spread looks (QB off the ball, receivers wide)
    pub fn is_spread(&self) -> bool {
        matches!(self, Self::Shotgun | Self::Empty)
    }
}

impl FromStr for OffensiveFormation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::unknown_label("offensive formation", s))
    }
}

impl fmt::Display for OffensiveFormation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defensive front/personnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DefensiveFormation {
    #[serde(rename = "4-3")]
    Base43,
    #[serde(rename = "3-4")]
    Base34,
    #[serde(rename = "nickel")]
    Nickel,
    #[serde(rename = "dime")]
    Dime,
    #[serde(rename = "goal_line")]
    GoalLine,
}

impl DefensiveFormation {
    pub const ALL: [DefensiveFormation; 5] =
        [Self::Base43, Self::Base34, Self::Nickel, Self::Dime, Self::GoalLine];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base43 => "4-3",
            Self::Base34 => "3-4",
            Self::Nickel => "nickel",
            Self::Dime => "dime",
            Self::GoalLine => "goal_line",
        }
    }
}

impl FromStr for DefensiveFormation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::unknown_label("defensive formation", s))
    }
}

impl fmt::Display for DefensiveFormation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage scheme label carried by the defensive posture.
///
/// `Prevent` is matched exactly; no other label (and no near-miss spelling)
/// triggers the prevent concessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverageScheme {
    Cover0,
    Cover1,
    Cover2,
    Cover3,
    Cover4,
    Man,
    Prevent,
}

impl CoverageScheme {
    pub const ALL: [CoverageScheme; 7] = [
        Self::Cover0,
        Self::Cover1,
        Self::Cover2,
        Self::Cover3,
        Self::Cover4,
        Self::Man,
        Self::Prevent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cover0 => "Cover0",
            Self::Cover1 => "Cover1",
            Self::Cover2 => "Cover2",
            Self::Cover3 => "Cover3",
            Self::Cover4 => "Cover4",
            Self::Man => "Man",
            Self::Prevent => "Prevent",
        }
    }

    pub fn is_zone(&self) -> bool {
        matches!(self, Self::Cover2 | Self::Cover3 | Self::Cover4 | Self::Prevent)
    }
}

impl FromStr for CoverageScheme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::unknown_label("coverage scheme", s))
    }
}

impl fmt::Display for CoverageScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Run,
    Pass,
}

impl PlayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Pass => "pass",
        }
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
