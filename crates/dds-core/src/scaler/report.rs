use serde::{Deserialize, Serialize};

use super::engine::DifficultyScaler;

/// Read-only diagnostics snapshot, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub earned_score: f64,
    /// Score still needed to reach the target, never negative.
    pub score_remaining: f64,
    /// Reward a milestone would earn right now.
    pub time_reward: f64,
    pub milestone_value: i64,
    pub time_remaining: f64,
    pub total_time: f64,
    pub effective_total_time: f64,
    pub time_elapsed: f64,
    pub target_win_minutes: f64,
    pub pace_ratio: f64,
}

impl GameState {
    pub(crate) fn capture(scaler: &DifficultyScaler) -> Self {
        let cfg = scaler.config();
        let clock = scaler.clock();
        Self {
            earned_score: round_to(scaler.progress(), 2),
            score_remaining: round_to(cfg.target_score - scaler.progress(), 2).max(0.0),
            time_reward: round_to(scaler.calculate_time_reward(), 2),
            milestone_value: scaler.milestone_value(),
            time_remaining: round_to(clock.remaining(), 2),
            total_time: round_to(clock.total(), 2),
            effective_total_time: round_to(clock.effective_total(), 2),
            time_elapsed: round_to(clock.elapsed(), 2),
            target_win_minutes: round_to(cfg.target_win_minutes, 2),
            pace_ratio: round_to(scaler.pace_ratio(), 3),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
