//! Difficulty scaler implementation.
//!
//! The scaler is a synchronous value object. It does not own a clock - the
//! game engine pushes readings in and pulls adjustments out.
//!
//! ## Engine loop
//!
//! ```ignore
//! let mut scaler = DifficultyScaler::new();
//! // every tick:
//! scaler.set_visible_time(remaining, total);
//! scaler.update_milestone_value();
//! // when the player captures a milestone:
//! let bonus = scaler.complete_milestone();
//! engine.add_minutes(bonus);
//! ```
//!
//! Deciding a reward and applying it are separate steps so the engine can
//! batch, animate or veto the bonus.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clock::{clamp_minutes, VisibleClock};
use super::config::ScalerConfig;
use super::pacing;
use super::report::GameState;
use super::reward;

/// Dynamic difficulty scaler.
///
/// All mutating operations take `&mut self`; callers that share a scaler
/// across threads wrap the whole value in one lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyScaler {
    pub(crate) config: ScalerConfig,
    /// Score earned so far.
    pub(crate) earned_score: f64,
    /// Current value of a milestone, integer-valued after every adjustment.
    pub(crate) milestone_value: f64,
    pub(crate) clock: VisibleClock,
}

impl Default for DifficultyScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyScaler {
    /// Create a scaler with the default tuning.
    pub fn new() -> Self {
        Self::with_config(ScalerConfig::default())
    }

    /// Create a scaler with custom tuning.
    ///
    /// The clock starts full at `config.visible_total_time`, which also
    /// becomes the pacing baseline.
    pub fn with_config(config: ScalerConfig) -> Self {
        let clock = VisibleClock::new(config.visible_total_time);
        Self {
            earned_score: 0.0,
            milestone_value: config.initial_milestone_value,
            clock,
            config,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &ScalerConfig {
        &self.config
    }

    pub fn clock(&self) -> &VisibleClock {
        &self.clock
    }

    /// Score earned so far.
    pub fn progress(&self) -> f64 {
        self.earned_score
    }

    pub fn milestone_value(&self) -> i64 {
        self.milestone_value as i64
    }

    pub fn visible_time_remaining(&self) -> f64 {
        self.clock.remaining()
    }

    pub fn visible_total_time(&self) -> f64 {
        self.clock.total()
    }

    pub fn start_visible_total_time(&self) -> f64 {
        self.clock.start_total()
    }

    pub fn awarded_time_ledger(&self) -> f64 {
        self.clock.awarded_ledger()
    }

    /// Elapsed minutes as of the last [`set_visible_time`](Self::set_visible_time)
    /// call, `None` before the first one.
    pub fn visible_elapsed(&self) -> Option<f64> {
        self.clock.elapsed_hint()
    }

    pub fn effective_total(&self) -> f64 {
        self.clock.effective_total()
    }

    pub fn pace_ratio(&self) -> f64 {
        pacing::pace_ratio(&self.config, self.earned_score, self.clock.elapsed())
    }

    /// Minutes a milestone completed right now would earn.
    pub fn calculate_time_reward(&self) -> f64 {
        reward::time_reward(
            &self.config,
            self.clock.remaining(),
            self.clock.remaining_fraction(),
        )
    }

    /// Rounded diagnostics for telemetry and UI.
    pub fn game_state(&self) -> GameState {
        GameState::capture(self)
    }

    // ── Clock ingestion ─────────────────────────────────────────────

    pub fn set_visible_time_remaining(&mut self, minutes: f64) {
        self.clock.set_remaining(minutes);
    }

    pub fn set_visible_total_time(&mut self, minutes: f64) {
        self.clock.set_total(minutes);
    }

    /// Apply both engine readings in order (total, then remaining).
    ///
    /// Readings are in minutes, never seconds.
    pub fn set_visible_time(&mut self, remaining: f64, total: f64) {
        self.clock.set(remaining, total);
    }

    /// Push a time adjustment from the scaler side into the tracked clock.
    ///
    /// Pass `record_to_ledger = false` when the delta did not originate from
    /// the scaler, so the effective total is not inflated twice.
    pub fn add_visible_time(&mut self, delta_minutes: f64, record_to_ledger: bool) {
        self.clock.add(delta_minutes, record_to_ledger);
        if record_to_ledger {
            debug!(
                delta_minutes,
                ledger = self.clock.awarded_ledger(),
                "recorded time adjustment"
            );
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_progress(&mut self, score: f64) {
        self.earned_score = clamp_minutes(score);
    }

    /// Bank the current milestone value and return the time bonus the
    /// engine should grant.
    ///
    /// Neither the clock nor the milestone value is touched; the engine
    /// applies the bonus and calls the adjuster on its own cadence.
    pub fn complete_milestone(&mut self) -> f64 {
        self.earned_score += self.milestone_value;
        self.calculate_time_reward()
    }

    /// Recompute the milestone value from the current pace and return it.
    pub fn update_milestone_value(&mut self) -> i64 {
        let before = self.milestone_value;
        let ratio = self.pace_ratio();
        self.milestone_value = pacing::adjust_milestone_value(
            &self.config,
            self.milestone_value,
            ratio,
            self.clock.remaining_fraction(),
        );
        debug!(
            from = before,
            to = self.milestone_value,
            pace_ratio = ratio,
            "milestone value updated"
        );
        self.milestone_value as i64
    }

    /// Start a new match on the current clock ceiling.
    pub fn reset(&mut self) {
        self.earned_score = 0.0;
        self.milestone_value = self.config.initial_milestone_value;
        self.clock.rebaseline();
    }
}
