//! Flat JSON snapshot of a scaler.
//!
//! Saving writes every field. Loading merges: keys present in the file
//! overwrite the in-memory value, absent keys keep it, so snapshots written
//! by older builds still load.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SnapshotError;
use crate::scaler::DifficultyScaler;

/// Default snapshot file name inside the data directory.
pub const DEFAULT_STATE_FILE: &str = "game_state.json";

/// Everything needed to restore a scaler, as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerSnapshot {
    pub target_score: f64,
    pub initial_milestone_value: f64,
    pub milestone_value: f64,
    pub earned_score: f64,
    pub visible_total_time: f64,
    pub visible_time_remaining: f64,
    pub target_win_minutes: f64,
    pub normal_time_reward: f64,
    pub low_time_reward: f64,
    pub high_time_threshold: f64,
    pub low_time_threshold: f64,
    pub high_time_cap: f64,
    pub start_visible_total_time: f64,
    pub awarded_time_ledger: f64,
    pub adjustment_rate: f64,
    pub min_milestone_value: f64,
    pub max_milestone_value: f64,
}

/// Input side of a snapshot: every key optional, unknown keys ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialSnapshot {
    #[serde(default, alias = "target_points")]
    pub target_score: Option<f64>,
    #[serde(default)]
    pub initial_milestone_value: Option<f64>,
    #[serde(default)]
    pub milestone_value: Option<f64>,
    #[serde(default, alias = "earned_points")]
    pub earned_score: Option<f64>,
    #[serde(default)]
    pub visible_total_time: Option<f64>,
    #[serde(default)]
    pub visible_time_remaining: Option<f64>,
    #[serde(default, alias = "target_win_time")]
    pub target_win_minutes: Option<f64>,
    #[serde(default)]
    pub normal_time_reward: Option<f64>,
    #[serde(default)]
    pub low_time_reward: Option<f64>,
    #[serde(default)]
    pub high_time_threshold: Option<f64>,
    #[serde(default)]
    pub low_time_threshold: Option<f64>,
    #[serde(default)]
    pub high_time_cap: Option<f64>,
    #[serde(default)]
    pub start_visible_total_time: Option<f64>,
    #[serde(default)]
    pub awarded_time_ledger: Option<f64>,
    #[serde(default)]
    pub adjustment_rate: Option<f64>,
    #[serde(default)]
    pub min_milestone_value: Option<f64>,
    #[serde(default)]
    pub max_milestone_value: Option<f64>,
}

fn merge(slot: &mut f64, incoming: Option<f64>) {
    if let Some(value) = incoming {
        *slot = value;
    }
}

impl DifficultyScaler {
    /// Capture the full persisted record.
    pub fn snapshot(&self) -> ScalerSnapshot {
        let cfg = &self.config;
        ScalerSnapshot {
            target_score: cfg.target_score,
            initial_milestone_value: cfg.initial_milestone_value,
            milestone_value: self.milestone_value,
            earned_score: self.earned_score,
            visible_total_time: self.clock.total,
            visible_time_remaining: self.clock.remaining,
            target_win_minutes: cfg.target_win_minutes,
            normal_time_reward: cfg.normal_time_reward,
            low_time_reward: cfg.low_time_reward,
            high_time_threshold: cfg.high_time_threshold,
            low_time_threshold: cfg.low_time_threshold,
            high_time_cap: cfg.high_time_cap,
            start_visible_total_time: self.clock.start_total,
            awarded_time_ledger: self.clock.awarded_ledger,
            adjustment_rate: cfg.adjustment_rate,
            min_milestone_value: cfg.min_milestone_value,
            max_milestone_value: cfg.max_milestone_value,
        }
    }

    /// Overwrite every field present in `partial`, keep the rest.
    pub fn apply_snapshot(&mut self, partial: PartialSnapshot) {
        let cfg = &mut self.config;
        merge(&mut cfg.target_score, partial.target_score);
        merge(&mut cfg.initial_milestone_value, partial.initial_milestone_value);
        merge(&mut self.milestone_value, partial.milestone_value);
        merge(&mut self.earned_score, partial.earned_score);
        merge(&mut self.clock.total, partial.visible_total_time);
        merge(&mut self.clock.remaining, partial.visible_time_remaining);
        merge(&mut cfg.target_win_minutes, partial.target_win_minutes);
        merge(&mut cfg.normal_time_reward, partial.normal_time_reward);
        merge(&mut cfg.low_time_reward, partial.low_time_reward);
        merge(&mut cfg.high_time_threshold, partial.high_time_threshold);
        merge(&mut cfg.low_time_threshold, partial.low_time_threshold);
        merge(&mut cfg.high_time_cap, partial.high_time_cap);
        merge(&mut self.clock.start_total, partial.start_visible_total_time);
        merge(&mut self.clock.awarded_ledger, partial.awarded_time_ledger);
        merge(&mut cfg.adjustment_rate, partial.adjustment_rate);
        merge(&mut cfg.min_milestone_value, partial.min_milestone_value);
        merge(&mut cfg.max_milestone_value, partial.max_milestone_value);
    }

    /// Write the full record to `path` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Encode`] if a field is not a finite number
    /// (JSON would store it as `null`, which loads as absent), or
    /// [`SnapshotError::WriteFailed`] if the file cannot be written.
    pub fn save_state(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let snapshot = self.snapshot();
        let record = serde_json::to_value(&snapshot).map_err(SnapshotError::Encode)?;
        if let Some((key, _)) = record
            .as_object()
            .and_then(|fields| fields.iter().find(|(_, value)| !value.is_number()))
        {
            return Err(SnapshotError::Encode(<serde_json::Error as serde::ser::Error>::custom(
                format!("field `{key}` is not a finite number"),
            )));
        }
        let content = serde_json::to_string_pretty(&snapshot).map_err(SnapshotError::Encode)?;
        std::fs::write(path, content).map_err(|source| SnapshotError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "scaler state saved");
        Ok(())
    }

    /// Merge the record at `path` into this scaler.
    ///
    /// Returns `Ok(false)` and leaves state untouched when the file does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::ReadFailed`] if the file exists but cannot be
    /// read, or [`SnapshotError::Malformed`] if it is not a flat record of
    /// numbers. Nothing is applied on error.
    pub fn load_state(&mut self, path: impl AsRef<Path>) -> Result<bool, SnapshotError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "save file not found, keeping current state"
                );
                return Ok(false);
            }
            Err(source) => {
                return Err(SnapshotError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let malformed = |source| SnapshotError::Malformed {
            path: path.to_path_buf(),
            source,
        };
        // The record must be a flat object; reject arrays and scalars up front.
        let record: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&content).map_err(malformed)?;
        let partial: PartialSnapshot =
            serde_json::from_value(serde_json::Value::Object(record)).map_err(malformed)?;
        self.apply_snapshot(partial);
        info!(path = %path.display(), "scaler state loaded");
        Ok(true)
    }
}
