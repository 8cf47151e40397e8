//! Tuning parameters for the scaler.
//!
//! Every field has a serde default so a partial `[scaler]` table in
//! `config.toml` fills in the rest.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Construction-time configuration.
///
/// `visible_total_time` is only the clock ceiling the scaler assumes before
/// the engine reports its own readings; it becomes the pacing baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerConfig {
    /// Score that should not be reached before `target_win_minutes`.
    #[serde(default = "default_target_score")]
    pub target_score: f64,
    #[serde(default = "default_initial_milestone_value")]
    pub initial_milestone_value: f64,
    /// Initial visible clock ceiling, in minutes.
    #[serde(default = "default_visible_total_time")]
    pub visible_total_time: f64,
    /// Visible minutes elapsed at which `target_score` should be reached.
    #[serde(default = "default_target_win_minutes")]
    pub target_win_minutes: f64,
    /// Strength of each milestone-value correction, typically 0.15-0.5.
    #[serde(default = "default_adjustment_rate")]
    pub adjustment_rate: f64,
    #[serde(default = "default_min_milestone_value")]
    pub min_milestone_value: f64,
    #[serde(default = "default_max_milestone_value")]
    pub max_milestone_value: f64,

    /// Reward floor; what an early milestone earns.
    #[serde(default = "default_normal_time_reward")]
    pub normal_time_reward: f64,
    /// Late-game reward ceiling.
    #[serde(default = "default_low_time_reward")]
    pub low_time_reward: f64,
    /// At or above this many minutes remaining the cap is `high_time_cap`.
    #[serde(default = "default_high_time_threshold")]
    pub high_time_threshold: f64,
    /// At or below this many minutes remaining the cap is `low_time_reward`.
    #[serde(default = "default_low_time_threshold")]
    pub low_time_threshold: f64,
    /// Reward ceiling while plenty of time remains.
    #[serde(default = "default_high_time_cap")]
    pub high_time_cap: f64,
}

fn default_target_score() -> f64 {
    100.0
}
fn default_initial_milestone_value() -> f64 {
    10.0
}
fn default_visible_total_time() -> f64 {
    100.0
}
fn default_target_win_minutes() -> f64 {
    400.0
}
fn default_adjustment_rate() -> f64 {
    0.25
}
fn default_min_milestone_value() -> f64 {
    1.0
}
fn default_max_milestone_value() -> f64 {
    20.0
}
fn default_normal_time_reward() -> f64 {
    1.0
}
fn default_low_time_reward() -> f64 {
    20.0
}
fn default_high_time_threshold() -> f64 {
    50.0
}
fn default_low_time_threshold() -> f64 {
    30.0
}
fn default_high_time_cap() -> f64 {
    5.0
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            target_score: default_target_score(),
            initial_milestone_value: default_initial_milestone_value(),
            visible_total_time: default_visible_total_time(),
            target_win_minutes: default_target_win_minutes(),
            adjustment_rate: default_adjustment_rate(),
            min_milestone_value: default_min_milestone_value(),
            max_milestone_value: default_max_milestone_value(),
            normal_time_reward: default_normal_time_reward(),
            low_time_reward: default_low_time_reward(),
            high_time_threshold: default_high_time_threshold(),
            low_time_threshold: default_low_time_threshold(),
            high_time_cap: default_high_time_cap(),
        }
    }
}

impl ScalerConfig {
    /// Clamp a candidate milestone value into the configured bounds.
    pub fn clamp_milestone_value(&self, value: f64) -> f64 {
        self.min_milestone_value
            .max(value.min(self.max_milestone_value))
    }

    /// Reject tunings the pacing math cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        if self.target_score.is_nan() || self.target_score <= 0.0 {
            return Err(invalid("target_score", "must be greater than 0"));
        }
        if self.target_win_minutes.is_nan() || self.target_win_minutes <= 0.0 {
            return Err(invalid("target_win_minutes", "must be greater than 0"));
        }
        if self.visible_total_time < 0.0 {
            return Err(invalid("visible_total_time", "must not be negative"));
        }
        if self.min_milestone_value > self.max_milestone_value {
            return Err(invalid(
                "min_milestone_value",
                "must not exceed max_milestone_value",
            ));
        }
        if self.low_time_threshold > self.high_time_threshold {
            return Err(invalid(
                "low_time_threshold",
                "must not exceed high_time_threshold",
            ));
        }
        Ok(())
    }
}
