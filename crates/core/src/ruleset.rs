//! Ruleset module - scoring, level progression and gravity timing
//!
//! A [`Ruleset`] is a policy object: the game state asks it how much a clear or a
//! soft drop is worth, how far the level advances, and how long the gravity timer
//! runs. Swapping rules means supplying another implementation; the engine never
//! branches on which ruleset is active.
//!
//! [`StandardRuleset`] is table driven. Its [`RulesetConfig`] can be built from a
//! preset or loaded from JSON, where missing fields fall back to the standard preset.
//!
//! Compatibility note: two scoring curves exist for this game. The standard table
//! (1/3/6/10, multiplier `(level + 1) / 16`) is the default; the classic table
//! (1/3/7/15, multiplier `level / 8 + 1`) is available as [`RulesetConfig::classic`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::ClearResult;
use crate::resolver::MoveResult;
use crate::types::ROW_CLEAR_MAX;

/// Slack added before flooring an accumulated level
const LEVEL_EPSILON: f64 = 1e-9;

/// Gravity countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Timer {
    /// Ticks since the last reset
    pub elapsed: u32,
    /// Ticks until a forced drop
    pub duration: u32,
    /// Set by the tick that reached `duration`
    pub triggered: bool,
}

impl Timer {
    pub fn with_duration(duration: u32) -> Self {
        Self {
            elapsed: 0,
            duration: duration.max(1),
            triggered: false,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.triggered = false;
    }
}

/// Scoring and timing policy
pub trait Ruleset: Send + Sync {
    fn label(&self) -> &str;

    /// Base score for a lock that completed `clear.count()` rows
    fn score_for_clear(&self, clear: &ClearResult) -> f64;

    /// Base score for a successful translation (soft drop)
    fn score_for_translation(&self, result: &MoveResult) -> f64;

    /// How far the level advances for a clear
    fn level_increment_for_clear(&self, level: f64, clear: &ClearResult) -> f64;

    /// Multiplier applied to every score award at `level`
    fn level_score_multiplier(&self, level: f64) -> f64;

    /// Gravity countdown length at `level`, in ticks
    fn timer_duration_for_level(&self, level: f64) -> u32;

    /// Advance the countdown by one tick
    ///
    /// Triggers on the tick where `elapsed` reaches `duration`. The caller performs
    /// the forced drop and resets the timer.
    fn advance_timer(&self, timer: Timer) -> Timer {
        let elapsed = timer.elapsed.saturating_add(1);
        Timer {
            elapsed,
            duration: timer.duration,
            triggered: elapsed >= timer.duration,
        }
    }
}

/// Error from building a ruleset configuration
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Parse(_) => "config_parse",
            ConfigError::InvalidValue { .. } => "config_invalid",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConfigError::Parse(e) => format!("could not parse ruleset config: {}", e),
            ConfigError::InvalidValue { field, reason } => {
                format!("invalid ruleset config field `{}`: {}", field, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Tables driving [`StandardRuleset`]
///
/// Arrays are indexed by the number of rows cleared (0..=4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesetConfig {
    pub label: String,
    pub clear_scores: [f64; ROW_CLEAR_MAX + 1],
    pub level_increments: [f64; ROW_CLEAR_MAX + 1],
    /// Score per row of a successful soft drop
    pub translation_score_per_row: f64,
    /// Multiplier is `(floor(level) + bias) / divisor`
    pub multiplier_bias: f64,
    pub multiplier_divisor: f64,
    /// Duration is `max(timer_min, timer_base / max(1, floor(level)))`
    pub timer_base: u32,
    pub timer_min: u32,
}

impl RulesetConfig {
    /// Default curve
    pub fn standard() -> Self {
        Self {
            label: "Standard".to_string(),
            clear_scores: [0.0, 1.0, 3.0, 6.0, 10.0],
            level_increments: [0.0, 0.10, 0.30, 0.60, 1.00],
            translation_score_per_row: 0.1,
            multiplier_bias: 1.0,
            multiplier_divisor: 16.0,
            timer_base: 120,
            timer_min: 1,
        }
    }

    /// Older curve: level rises one step per eight rows
    pub fn classic() -> Self {
        Self {
            label: "Classic".to_string(),
            clear_scores: [0.0, 1.0, 3.0, 7.0, 15.0],
            level_increments: [0.0, 0.125, 0.25, 0.375, 0.5],
            translation_score_per_row: 0.3,
            multiplier_bias: 8.0,
            multiplier_divisor: 8.0,
            timer_base: 120,
            timer_min: 1,
        }
    }

    /// Parse and validate a JSON document; absent fields take standard values
    ///
    /// ```
    /// use tetromino_rules_core::RulesetConfig;
    ///
    /// let config = RulesetConfig::from_json(r#"{ "timer_base": 60 }"#).unwrap();
    /// assert_eq!(config.timer_base, 60);
    /// assert_eq!(config.clear_scores, RulesetConfig::standard().clear_scores);
    ///
    /// assert!(RulesetConfig::from_json(r#"{ "multiplier_divisor": 0 }"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RulesetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let table_ok = |t: &[f64]| t.iter().all(|v| v.is_finite() && *v >= 0.0);

        if !table_ok(&self.clear_scores) {
            return Err(ConfigError::InvalidValue {
                field: "clear_scores",
                reason: "entries must be finite and non-negative",
            });
        }
        if !table_ok(&self.level_increments) {
            return Err(ConfigError::InvalidValue {
                field: "level_increments",
                reason: "entries must be finite and non-negative",
            });
        }
        if !table_ok(&[self.translation_score_per_row, self.multiplier_bias]) {
            return Err(ConfigError::InvalidValue {
                field: "translation_score_per_row",
                reason: "score and bias must be finite and non-negative",
            });
        }
        if !(self.multiplier_divisor.is_finite() && self.multiplier_divisor > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "multiplier_divisor",
                reason: "must be greater than zero",
            });
        }
        if self.timer_base == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timer_base",
                reason: "must be at least one tick",
            });
        }
        if self.timer_min == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timer_min",
                reason: "must be at least one tick",
            });
        }
        Ok(())
    }
}

impl Default for RulesetConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Table-driven ruleset
#[derive(Debug, Clone, PartialEq)]
pub struct StandardRuleset {
    config: RulesetConfig,
}

impl StandardRuleset {
    pub fn new() -> Self {
        Self {
            config: RulesetConfig::standard(),
        }
    }

    pub fn classic() -> Self {
        Self {
            config: RulesetConfig::classic(),
        }
    }

    pub fn from_config(config: RulesetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RulesetConfig {
        &self.config
    }

    /// Integer part of `level`, tolerant of sums like `0.1 + 1.0 + 0.3 * 3`
    /// landing a hair below the next whole level
    fn whole_level(level: f64) -> f64 {
        (level + LEVEL_EPSILON).floor().max(0.0)
    }
}

impl Default for StandardRuleset {
    fn default() -> Self {
        Self::new()
    }
}

impl Ruleset for StandardRuleset {
    fn label(&self) -> &str {
        &self.config.label
    }

    fn score_for_clear(&self, clear: &ClearResult) -> f64 {
        self.config
            .clear_scores
            .get(clear.count())
            .copied()
            .unwrap_or(0.0)
    }

    fn score_for_translation(&self, result: &MoveResult) -> f64 {
        if result.vector.y < 0 {
            -result.vector.y as f64 * self.config.translation_score_per_row
        } else {
            0.0
        }
    }

    fn level_increment_for_clear(&self, _level: f64, clear: &ClearResult) -> f64 {
        self.config
            .level_increments
            .get(clear.count())
            .copied()
            .unwrap_or(0.0)
    }

    fn level_score_multiplier(&self, level: f64) -> f64 {
        (Self::whole_level(level) + self.config.multiplier_bias) / self.config.multiplier_divisor
    }

    fn timer_duration_for_level(&self, level: f64) -> u32 {
        let divisor = Self::whole_level(level).max(1.0) as u32;
        (self.config.timer_base / divisor).max(self.config.timer_min)
    }
}
