//! Kernel Configuration
//!
//! Every tuning constant the kernel reads lives here and is passed into the
//! entry points explicitly. Nothing is process-global.
//!
//! ## Usage
//!
//! ```rust
//! use gridiron_core::kernel::config::KernelConfig;
//!
//! let config = KernelConfig::default();
//! assert_eq!(config.tackling.long_run_threshold, 5);
//!
//! let yaml = "run:\n  variance_multiplier_cap: 1.5\n";
//! let tuned = KernelConfig::from_yaml_str(yaml).unwrap();
//! assert_eq!(tuned.run.variance_multiplier_cap, 1.5);
//! ```
//!
//! ## Environment Variables
//!
//! - `GRIDIRON_KERNEL_CONFIG`: path to a YAML or JSON file read by
//!   [`KernelConfig::from_env_or_default`]

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::warn;

pub const CONFIG_PATH_ENV: &str = "GRIDIRON_KERNEL_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub ratings: RatingConfig,
    pub run: RunConfig,
    pub pass: PassConfig,
    pub blocking: BlockingConfig,
    pub tackling: TacklingConfig,
}

impl KernelConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(CoreError::UnsupportedFormat { path: path.display().to_string() }),
        }
    }

    /// Load from `GRIDIRON_KERNEL_CONFIG` if set, otherwise defaults.
    ///
    /// A file that cannot be loaded is logged and the defaults are used.
    pub fn from_env_or_default() -> Self {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load(&path).unwrap_or_else(|err| {
                warn!(%path, error = %err, "kernel config unusable, using defaults");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.ratings.offense.validate("ratings.offense")?;
        self.ratings.defense.validate("ratings.defense")?;
        self.run.validate()?;
        self.pass.validate()?;
        self.blocking.validate()?;
        self.tackling.validate()?;
        Ok(())
    }
}

fn check_probability(field: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::invalid(field, format!("{value} is not a probability")))
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::invalid(field, format!("{value} must be positive")))
    }
}

/// Clamp `value` between two bounds given in either order.
///
/// Configs built in code skip [`KernelConfig::validate`], so the kernel never
/// relies on `lo <= hi` holding.
pub(crate) fn clamp_between(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo.min(hi)).min(lo.max(hi))
}

// ============================================================================
// Rating tiers
// ============================================================================

/// Three-tier rating bonus applied on a base multiplier of 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBonuses {
    /// Rating at or above which the elite bonus applies
    pub elite_threshold: f32,
    pub good_threshold: f32,
    /// Rating at or below which the poor penalty applies
    pub poor_threshold: f32,
    pub elite_bonus: f32,
    pub good_bonus: f32,
    /// Signed (negative) adjustment
    pub poor_adjustment: f32,
}

impl TierBonuses {
    pub fn offense() -> Self {
        Self {
            elite_threshold: 90.0,
            good_threshold: 80.0,
            poor_threshold: 65.0,
            elite_bonus: 0.30,
            good_bonus: 0.15,
            poor_adjustment: -0.20,
        }
    }

    pub fn defense() -> Self {
        Self {
            elite_threshold: 90.0,
            good_threshold: 80.0,
            poor_threshold: 65.0,
            elite_bonus: 0.25,
            good_bonus: 0.10,
            poor_adjustment: -0.15,
        }
    }

    /// Multiplier for `rating`: 1.0 plus the matching tier adjustment
    pub fn modifier(&self, rating: f32) -> f32 {
        if rating >= self.elite_threshold {
            1.0 + self.elite_bonus
        } else if rating >= self.good_threshold {
            1.0 + self.good_bonus
        } else if rating <= self.poor_threshold {
            1.0 + self.poor_adjustment
        } else {
            1.0
        }
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        if !(self.poor_threshold < self.good_threshold && self.good_threshold <= self.elite_threshold) {
            return Err(CoreError::invalid(field, "thresholds must satisfy poor < good <= elite"));
        }
        if 1.0 + self.poor_adjustment <= 0.0 {
            return Err(CoreError::invalid(field, "poor adjustment would zero the multiplier"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub offense: TierBonuses,
    pub defense: TierBonuses,
    /// Linebackers averaged for run defense
    pub run_stoppers: usize,
    /// Linemen averaged for pass rush
    pub pass_rushers: usize,
    /// Defensive backs averaged for coverage
    pub coverage_defenders: usize,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            offense: TierBonuses::offense(),
            defense: TierBonuses::defense(),
            run_stoppers: 3,
            pass_rushers: 4,
            coverage_defenders: 4,
        }
    }
}

// ============================================================================
// Run plays
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Ceiling on the rating multiplier applied to variance
    pub variance_multiplier_cap: f32,
    /// Flat mean-yards concession against prevent
    pub prevent_mean_bonus: f32,
    pub prevent_variance_multiplier: f32,
    /// Dead-ball time range for a run, before per-yard time
    pub min_seconds: f32,
    pub max_seconds: f32,
    pub seconds_per_yard: f32,
    /// Chance the carrier loses a fumble
    pub fumble_rate: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            variance_multiplier_cap: 1.2,
            prevent_mean_bonus: 1.0,
            prevent_variance_multiplier: 1.2,
            min_seconds: 4.0,
            max_seconds: 7.0,
            seconds_per_yard: 0.12,
            fumble_rate: 0.008,
        }
    }
}

impl RunConfig {
    fn validate(&self) -> Result<()> {
        check_positive("run.variance_multiplier_cap", self.variance_multiplier_cap)?;
        check_positive("run.prevent_variance_multiplier", self.prevent_variance_multiplier)?;
        check_positive("run.min_seconds", self.min_seconds)?;
        if self.max_seconds < self.min_seconds {
            return Err(CoreError::invalid("run.max_seconds", "must be >= min_seconds"));
        }
        check_probability("run.fumble_rate", self.fumble_rate)
    }
}

// ============================================================================
// Pass plays
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Flat completion-rate concession against prevent
    pub prevent_completion_bonus: f32,
    /// Fractional sack-rate reduction against prevent (rushing fewer)
    pub prevent_sack_reduction: f32,
    /// Completion-rate multiplier when the QB is pressured
    pub pressure_completion_factor: f32,
    /// Interception-rate multiplier when the QB is pressured
    pub pressure_interception_factor: f32,
    pub min_completion_rate: f32,
    pub max_completion_rate: f32,
    pub air_yards_std_dev: f32,
    pub min_air_yards: f32,
    pub max_air_yards: f32,
    pub sack_yards_mean: f32,
    pub sack_yards_std_dev: f32,
    pub time_to_throw_std_dev: f32,
    pub min_time_to_throw: f32,
    pub max_time_to_throw: f32,
    /// Ball-in-air plus run-after-catch time per yard
    pub seconds_per_yard: f32,
    /// Extra time after an incompletion is blown dead
    pub incompletion_seconds: f32,
    pub sack_seconds: f32,
    /// Exponent on receiver overall when picking a target
    pub target_rating_exponent: f32,
    /// Weight of edge rushers (DE) relative to interior/LB when crediting sacks
    pub edge_sack_weight: f32,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            prevent_completion_bonus: 0.05,
            prevent_sack_reduction: 0.30,
            pressure_completion_factor: 0.80,
            pressure_interception_factor: 1.5,
            min_completion_rate: 0.05,
            max_completion_rate: 0.95,
            air_yards_std_dev: 5.0,
            min_air_yards: -3.0,
            max_air_yards: 60.0,
            sack_yards_mean: 6.5,
            sack_yards_std_dev: 2.5,
            time_to_throw_std_dev: 0.5,
            min_time_to_throw: 1.5,
            max_time_to_throw: 6.0,
            seconds_per_yard: 0.12,
            incompletion_seconds: 1.0,
            sack_seconds: 0.5,
            target_rating_exponent: 2.0,
            edge_sack_weight: 2.0,
        }
    }
}

impl PassConfig {
    fn validate(&self) -> Result<()> {
        check_probability("pass.prevent_completion_bonus", self.prevent_completion_bonus)?;
        check_probability("pass.prevent_sack_reduction", self.prevent_sack_reduction)?;
        check_probability("pass.min_completion_rate", self.min_completion_rate)?;
        check_probability("pass.max_completion_rate", self.max_completion_rate)?;
        if self.min_completion_rate > self.max_completion_rate {
            return Err(CoreError::invalid("pass.min_completion_rate", "must be <= max"));
        }
        check_positive("pass.air_yards_std_dev", self.air_yards_std_dev)?;
        check_positive("pass.sack_yards_std_dev", self.sack_yards_std_dev)?;
        check_positive("pass.time_to_throw_std_dev", self.time_to_throw_std_dev)?;
        if self.min_air_yards > self.max_air_yards {
            return Err(CoreError::invalid("pass.min_air_yards", "must be <= max_air_yards"));
        }
        if self.min_time_to_throw > self.max_time_to_throw {
            return Err(CoreError::invalid("pass.min_time_to_throw", "must be <= max"));
        }
        check_positive("pass.edge_sack_weight", self.edge_sack_weight)
    }
}

// ============================================================================
// Attribution
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockingConfig {
    pub min_blockers: usize,
    pub max_blockers: usize,
    pub base_success_rate: f32,
    pub per_yard_bonus: f32,
    pub max_success_rate: f32,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            min_blockers: 2,
            max_blockers: 3,
            base_success_rate: 0.60,
            per_yard_bonus: 0.02,
            max_success_rate: 0.95,
        }
    }
}

impl BlockingConfig {
    /// Success probability for a block on a play that gained `yards`
    pub fn success_rate(&self, yards: i32) -> f32 {
        (self.base_success_rate + self.per_yard_bonus * yards.max(0) as f32)
            .min(self.max_success_rate)
    }

    /// Blockers credited per run, bounds taken in either order
    pub fn blocker_range(&self) -> RangeInclusive<usize> {
        let lo = self.min_blockers.min(self.max_blockers);
        let hi = self.min_blockers.max(self.max_blockers);
        lo..=hi
    }

    fn validate(&self) -> Result<()> {
        if self.min_blockers > self.max_blockers {
            return Err(CoreError::invalid("blocking.min_blockers", "must be <= max_blockers"));
        }
        check_probability("blocking.base_success_rate", self.base_success_rate)?;
        check_probability("blocking.max_success_rate", self.max_success_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacklingConfig {
    /// Gains at or beyond this draw a possible assisted tackle
    pub long_run_threshold: i32,
    pub assist_probability: f32,
}

impl Default for TacklingConfig {
    fn default() -> Self {
        Self { long_run_threshold: 5, assist_probability: 0.60 }
    }
}

impl TacklingConfig {
    fn validate(&self) -> Result<()> {
        check_probability("tackling.assist_probability", self.assist_probability)
    }
}
