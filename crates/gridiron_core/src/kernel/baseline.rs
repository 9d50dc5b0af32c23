//! Formation Matchup Baselines
//!
//! League-average play parameters keyed by (offensive formation, defensive
//! formation). A missing matchup is not an error: lookups fall back to the
//! table's default baseline.
//!
//! ## File format (YAML)
//!
//! ```yaml
//! default_run: { mean_yards: 4.3, variance: 2.4 }
//! default_pass: { completion_rate: 0.64, ... }
//! matchups:
//!   - offense: shotgun
//!     defense: nickel
//!     run: { mean_yards: 4.9, variance: 3.0 }
//! ```

use crate::error::Result;
use crate::models::{DefensiveFormation, OffensiveFormation};
use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Run-play yardage distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunBaseline {
    pub mean_yards: f32,
    pub variance: f32,
}

impl Default for RunBaseline {
    fn default() -> Self {
        Self { mean_yards: 4.3, variance: 2.4 }
    }
}

/// Pass-play parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassBaseline {
    pub completion_rate: f32,
    pub sack_rate: f32,
    pub pressure_rate: f32,
    pub deflection_rate: f32,
    pub interception_rate: f32,
    pub mean_air_yards: f32,
    pub mean_yards_after_catch: f32,
    /// Seconds from snap to release
    pub mean_time_to_throw: f32,
}

impl Default for PassBaseline {
    fn default() -> Self {
        Self {
            completion_rate: 0.64,
            sack_rate: 0.065,
            pressure_rate: 0.30,
            deflection_rate: 0.06,
            interception_rate: 0.024,
            mean_air_yards: 7.8,
            mean_yards_after_catch: 5.0,
            mean_time_to_throw: 2.75,
        }
    }
}

type MatchupKey = (OffensiveFormation, DefensiveFormation);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineTable {
    default_run: RunBaseline,
    default_pass: PassBaseline,
    run: FxHashMap<MatchupKey, RunBaseline>,
    pass: FxHashMap<MatchupKey, PassBaseline>,
}

static STANDARD: Lazy<BaselineTable> = Lazy::new(build_standard_table);

impl BaselineTable {
    /// Empty table: every lookup returns the given defaults
    pub fn new(default_run: RunBaseline, default_pass: PassBaseline) -> Self {
        Self { default_run, default_pass, run: FxHashMap::default(), pass: FxHashMap::default() }
    }

    /// League table covering every formation pairing
    pub fn standard() -> &'static BaselineTable {
        &STANDARD
    }

    pub fn default_run(&self) -> RunBaseline {
        self.default_run
    }

    pub fn default_pass(&self) -> PassBaseline {
        self.default_pass
    }

    pub fn insert_run(
        &mut self,
        offense: OffensiveFormation,
        defense: DefensiveFormation,
        baseline: RunBaseline,
    ) {
        self.run.insert((offense, defense), baseline);
    }

    pub fn insert_pass(
        &mut self,
        offense: OffensiveFormation,
        defense: DefensiveFormation,
        baseline: PassBaseline,
    ) {
        self.pass.insert((offense, defense), baseline);
    }

    pub fn with_run(
        mut self,
        offense: OffensiveFormation,
        defense: DefensiveFormation,
        baseline: RunBaseline,
    ) -> Self {
        self.insert_run(offense, defense, baseline);
        self
    }

    pub fn with_pass(
        mut self,
        offense: OffensiveFormation,
        defense: DefensiveFormation,
        baseline: PassBaseline,
    ) -> Self {
        self.insert_pass(offense, defense, baseline);
        self
    }

    /// Exact matchup entry, without fallback
    pub fn lookup_run(
        &self,
        offense: OffensiveFormation,
        defense: DefensiveFormation,
    ) -> Option<&RunBaseline> {
        self.run.get(&(offense, defense))
    }

    pub fn lookup_pass(
        &self,
        offense: OffensiveFormation,
        defense: DefensiveFormation,
    ) -> Option<&PassBaseline> {
        self.pass.get(&(offense, defense))
    }

    /// Run baseline for the matchup, or the default when the table has no entry
    pub fn run(&self, offense: OffensiveFormation, defense: DefensiveFormation) -> RunBaseline {
        match self.lookup_run(offense, defense) {
            Some(b) => *b,
            None => {
                debug!(%offense, %defense, "no run baseline for matchup, using default");
                self.default_run
            }
        }
    }

    pub fn pass(&self, offense: OffensiveFormation, defense: DefensiveFormation) -> PassBaseline {
        match self.lookup_pass(offense, defense) {
            Some(b) => *b,
            None => {
                debug!(%offense, %defense, "no pass baseline for matchup, using default");
                self.default_pass
            }
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: BaselineFile = serde_yaml::from_str(yaml)?;
        Ok(file.into())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&BaselineFile::from(self))?)
    }
}

// ============================================================================
// Serialized form
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BaselineFile {
    #[serde(default)]
    default_run: RunBaseline,
    #[serde(default)]
    default_pass: PassBaseline,
    #[serde(default)]
    matchups: Vec<MatchupEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MatchupEntry {
    offense: OffensiveFormation,
    defense: DefensiveFormation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    run: Option<RunBaseline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pass: Option<PassBaseline>,
}

impl From<BaselineFile> for BaselineTable {
    fn from(file: BaselineFile) -> Self {
        let mut table = BaselineTable::new(file.default_run, file.default_pass);
        for entry in file.matchups {
            if let Some(run) = entry.run {
                table.insert_run(entry.offense, entry.defense, run);
            }
            if let Some(pass) = entry.pass {
                table.insert_pass(entry.offense, entry.defense, pass);
            }
        }
        table
    }
}

impl From<&BaselineTable> for BaselineFile {
    fn from(table: &BaselineTable) -> Self {
        let mut keys: Vec<MatchupKey> = table.run.keys().chain(table.pass.keys()).copied().collect();
        keys.sort();
        keys.dedup();
        let matchups = keys
            .into_iter()
            .map(|(offense, defense)| MatchupEntry {
                offense,
                defense,
                run: table.run.get(&(offense, defense)).copied(),
                pass: table.pass.get(&(offense, defense)).copied(),
            })
            .collect();
        BaselineFile { default_run: table.default_run, default_pass: table.default_pass, matchups }
    }
}

// ============================================================================
// Standard league table
// ============================================================================

/// (mean yards, variance) by offensive formation
fn offense_run_profile(f: OffensiveFormation) -> (f32, f32) {
    match f {
        OffensiveFormation::IFormation => (4.2, 2.3),
        OffensiveFormation::SingleBack => (4.3, 2.4),
        OffensiveFormation::Pistol => (4.4, 2.5),
        OffensiveFormation::Shotgun => (4.5, 2.7),
        OffensiveFormation::Empty => (3.9, 3.0),
        OffensiveFormation::GoalLine => (2.9, 1.5),
    }
}

/// (mean multiplier, variance multiplier) by defensive front
fn defense_run_profile(f: DefensiveFormation) -> (f32, f32) {
    match f {
        DefensiveFormation::Base43 => (0.97, 1.0),
        DefensiveFormation::Base34 => (1.0, 1.0),
        DefensiveFormation::Nickel => (1.10, 1.15),
        DefensiveFormation::Dime => (1.20, 1.30),
        DefensiveFormation::GoalLine => (0.60, 0.60),
    }
}

/// Completion delta, sack multiplier, air-yards multiplier, time-to-throw delta
fn offense_pass_profile(f: OffensiveFormation) -> (f32, f32, f32, f32) {
    match f {
        OffensiveFormation::IFormation => (-0.02, 1.05, 1.15, 0.15),
        OffensiveFormation::SingleBack => (0.0, 1.0, 1.0, 0.0),
        OffensiveFormation::Pistol => (0.0, 0.98, 1.0, 0.0),
        OffensiveFormation::Shotgun => (0.02, 0.90, 0.95, -0.10),
        OffensiveFormation::Empty => (0.03, 1.20, 0.90, -0.25),
        OffensiveFormation::GoalLine => (-0.04, 1.10, 0.60, 0.10),
    }
}

/// Completion delta, sack, interception, deflection and YAC multipliers
fn defense_pass_profile(f: DefensiveFormation) -> (f32, f32, f32, f32, f32) {
    match f {
        DefensiveFormation::Base43 => (0.02, 1.05, 0.90, 0.90, 1.05),
        DefensiveFormation::Base34 => (0.01, 1.10, 0.95, 0.95, 1.05),
        DefensiveFormation::Nickel => (0.0, 1.0, 1.0, 1.0, 1.0),
        DefensiveFormation::Dime => (-0.03, 0.90, 1.15, 1.15, 0.90),
        DefensiveFormation::GoalLine => (0.03, 1.20, 0.80, 0.80, 0.70),
    }
}

fn build_standard_table() -> BaselineTable {
    let base_pass = PassBaseline::default();
    let mut table = BaselineTable::new(RunBaseline::default(), base_pass);

    for offense in OffensiveFormation::ALL {
        for defense in DefensiveFormation::ALL {
            let (mean, var) = offense_run_profile(offense);
            let (mean_mult, var_mult) = defense_run_profile(defense);
            table.insert_run(
                offense,
                defense,
                RunBaseline { mean_yards: mean * mean_mult, variance: var * var_mult },
            );

            let (o_comp, o_sack, o_air, o_ttt) = offense_pass_profile(offense);
            let (d_comp, d_sack, d_int, d_defl, d_yac) = defense_pass_profile(defense);
            table.insert_pass(
                offense,
                defense,
                PassBaseline {
                    completion_rate: base_pass.completion_rate + o_comp + d_comp,
                    sack_rate: base_pass.sack_rate * o_sack * d_sack,
                    pressure_rate: base_pass.pressure_rate * d_sack,
                    deflection_rate: base_pass.deflection_rate * d_defl,
                    interception_rate: base_pass.interception_rate * d_int,
                    mean_air_yards: base_pass.mean_air_yards * o_air,
                    mean_yards_after_catch: base_pass.mean_yards_after_catch * d_yac,
                    mean_time_to_throw: base_pass.mean_time_to_throw + o_ttt,
                },
            );
        }
    }
    table
}
