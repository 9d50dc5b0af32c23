//! Roster players and position groups

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Players on the field per side
pub const PLAYERS_ON_FIELD: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    FB,
    WR,
    TE,
    OT,
    OG,
    C,
    DE,
    DT,
    LB,
    CB,
    S,
    K,
    P,
}

impl Position {
    pub const ALL: [Position; 15] = [
        Self::QB,
        Self::RB,
        Self::FB,
        Self::WR,
        Self::TE,
        Self::OT,
        Self::OG,
        Self::C,
        Self::DE,
        Self::DT,
        Self::LB,
        Self::CB,
        Self::S,
        Self::K,
        Self::P,
    ];

    pub const OFFENSIVE_LINE: [Position; 3] = [Self::OT, Self::OG, Self::C];
    pub const BALL_CARRIERS: [Position; 2] = [Self::RB, Self::FB];
    pub const RECEIVERS: [Position; 4] = [Self::WR, Self::TE, Self::RB, Self::FB];
    pub const RUN_STOPPERS: [Position; 1] = [Self::LB];
    pub const RUN_TACKLERS: [Position; 2] = [Self::LB, Self::S];
    pub const PASS_RUSHERS: [Position; 3] = [Self::DE, Self::DT, Self::LB];
    pub const DEFENSIVE_LINE: [Position; 2] = [Self::DE, Self::DT];
    pub const COVERAGE: [Position; 2] = [Self::CB, Self::S];
    pub const PASS_TACKLERS: [Position; 3] = [Self::CB, Self::S, Self::LB];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QB => "QB",
            Self::RB => "RB",
            Self::FB => "FB",
            Self::WR => "WR",
            Self::TE => "TE",
            Self::OT => "OT",
            Self::OG => "OG",
            Self::C => "C",
            Self::DE => "DE",
            Self::DT => "DT",
            Self::LB => "LB",
            Self::CB => "CB",
            Self::S => "S",
            Self::K => "K",
            Self::P => "P",
        }
    }
}

impl FromStr for Position {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::unknown_label("position", s))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player as seen by the kernel: identity, position and overall rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// Overall rating (0-99)
    pub overall: u8,
}

impl RosterPlayer {
    pub fn new(id: u32, name: impl Into<String>, position: Position, overall: u8) -> Self {
        Self { id: PlayerId(id), name: name.into(), position, overall }
    }
}

/// The eleven players one side has on the field for a play.
///
/// Lookups never fail: a missing position group simply yields nothing and the
/// caller skips whatever depended on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<RosterPlayer>,
}

impl Roster {
    pub fn new(players: Vec<RosterPlayer>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full_field(&self) -> bool {
        self.players.len() == PLAYERS_ON_FIELD
    }

    pub fn get(&self, id: PlayerId) -> Option<&RosterPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Players at any of `positions`, in roster order
    pub fn at<'a, 'p>(
        &'a self,
        positions: &'p [Position],
    ) -> impl Iterator<Item = &'a RosterPlayer> + 'p
    where
        'a: 'p,
    {
        self.players.iter().filter(move |p| positions.contains(&p.position))
    }

    /// Highest-rated player at any of `positions`.
    ///
    /// Ties go to the player listed first on the roster.
    pub fn best_at(&self, positions: &[Position]) -> Option<&RosterPlayer> {
        self.at(positions).fold(None, |best: Option<&RosterPlayer>, p| match best {
            Some(b) if b.overall >= p.overall => Some(b),
            _ => Some(p),
        })
    }

    /// Top `n` players at `positions`, highest overall first (stable on ties).
    pub fn top_at(&self, positions: &[Position], n: usize) -> Vec<&RosterPlayer> {
        let mut group: Vec<&RosterPlayer> = self.at(positions).collect();
        group.sort_by(|a, b| b.overall.cmp(&a.overall));
        group.truncate(n);
        group
    }

    /// Average overall of the top `n` players at `positions`.
    ///
    /// Averages whoever is present when the group is short; `None` if empty.
    pub fn top_average(&self, positions: &[Position], n: usize) -> Option<f32> {
        let group = self.top_at(positions, n);
        if group.is_empty() {
            return None;
        }
        let sum: f32 = group.iter().map(|p| p.overall as f32).sum();
        Some(sum / group.len() as f32)
    }

    /// Primary ball carrier: best RB, falling back to the best FB.
    pub fn ball_carrier(&self) -> Option<&RosterPlayer> {
        self.best_at(&[Position::RB]).or_else(|| self.best_at(&[Position::FB]))
    }

    pub fn quarterback(&self) -> Option<&RosterPlayer> {
        self.best_at(&[Position::QB])
    }
}
