//! Shared rosters for kernel tests

use crate::models::{Position, Roster, RosterPlayer};

const OFFENSE: [(Position, &str); 11] = [
    (Position::QB, "QB"),
    (Position::RB, "RB"),
    (Position::WR, "WR1"),
    (Position::WR, "WR2"),
    (Position::WR, "WR3"),
    (Position::TE, "TE"),
    (Position::OT, "LT"),
    (Position::OG, "LG"),
    (Position::C, "C"),
    (Position::OG, "RG"),
    (Position::OT, "RT"),
];

const DEFENSE: [(Position, &str); 11] = [
    (Position::DE, "LDE"),
    (Position::DT, "DT1"),
    (Position::DT, "DT2"),
    (Position::DE, "RDE"),
    (Position::LB, "WLB"),
    (Position::LB, "MLB"),
    (Position::LB, "SLB"),
    (Position::CB, "CB1"),
    (Position::CB, "CB2"),
    (Position::S, "FS"),
    (Position::S, "SS"),
];

fn build(layout: &[(Position, &str)], first_id: u32, rating: impl Fn(Position) -> u8) -> Roster {
    Roster::new(
        layout
            .iter()
            .enumerate()
            .map(|(i, (pos, name))| RosterPlayer::new(first_id + i as u32, *name, *pos, rating(*pos)))
            .collect(),
    )
}

/// Eleven on offense, ids 1-11, everyone rated `overall`
pub fn offense(overall: u8) -> Roster {
    build(&OFFENSE, 1, |_| overall)
}

/// Eleven on defense, ids 101-111, everyone rated `overall`
pub fn defense(overall: u8) -> Roster {
    build(&DEFENSE, 101, |_| overall)
}

/// Offense with the ball carrier rated separately
pub fn offense_with_carrier(carrier: u8, rest: u8) -> Roster {
    build(&OFFENSE, 1, |p| if p == Position::RB { carrier } else { rest })
}

/// Defense with the linebackers rated separately
pub fn defense_with_linebackers(linebackers: u8, rest: u8) -> Roster {
    build(&DEFENSE, 101, |p| if p == Position::LB { linebackers } else { rest })
}
