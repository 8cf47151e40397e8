use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Describes one change applied to a scaler.
/// The CLI prints these; an engine can log or replay them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ClockUpdated {
        remaining: f64,
        total: f64,
        effective_total: f64,
        at: DateTime<Utc>,
    },
    /// Minutes pushed into the clock from the scaler side.
    TimeAdded {
        delta_minutes: f64,
        recorded_to_ledger: bool,
        remaining: f64,
        awarded_time_ledger: f64,
        at: DateTime<Utc>,
    },
    ProgressSet {
        earned_score: f64,
        at: DateTime<Utc>,
    },
    /// A milestone was banked; the engine should grant `time_bonus` minutes.
    MilestoneCompleted {
        milestone_value: i64,
        earned_score: f64,
        time_bonus: f64,
        at: DateTime<Utc>,
    },
    MilestoneValueAdjusted {
        from: i64,
        to: i64,
        pace_ratio: f64,
        at: DateTime<Utc>,
    },
    MatchReset {
        visible_total_time: f64,
        at: DateTime<Utc>,
    },
    StateSaved {
        path: String,
        at: DateTime<Utc>,
    },
    /// `found` is false when the file was absent and nothing changed.
    StateLoaded {
        path: String,
        found: bool,
        at: DateTime<Utc>,
    },
}
