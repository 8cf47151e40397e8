//! Visible-clock bookkeeping.
//!
//! The countdown itself lives in the game engine. This module only keeps the
//! last readings plus a ledger of minutes the scaler granted, so that the
//! derived elapsed time stays non-negative however the engine perturbs its
//! own clock.

use serde::{Deserialize, Serialize};

/// Floor applied to the effective total before it is used as a divisor.
pub const EFFECTIVE_TOTAL_EPSILON: f64 = 1e-9;

/// Clamp a reading into `[0, f64::MAX]`; NaN reads as 0.
pub(crate) fn clamp_minutes(minutes: f64) -> f64 {
    if minutes.is_nan() {
        0.0
    } else {
        minutes.clamp(0.0, f64::MAX)
    }
}

/// Saturate a signed quantity to the finite range; NaN reads as 0.
fn clamp_finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Last-known clock readings, all in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleClock {
    /// Minutes left on the engine clock. Never negative.
    pub(crate) remaining: f64,
    /// Current ceiling of the engine clock. Never negative.
    pub(crate) total: f64,
    /// Total observed at construction/reset; the pacing baseline.
    pub(crate) start_total: f64,
    /// Net minutes the scaler has pushed into the clock.
    pub(crate) awarded_ledger: f64,
    /// Convenience value refreshed by [`VisibleClock::set`]; not read internally.
    #[serde(skip)]
    pub(crate) elapsed: Option<f64>,
}

impl VisibleClock {
    /// A fresh clock with `total` minutes on it and nothing elapsed.
    pub fn new(total: f64) -> Self {
        let total = clamp_minutes(total);
        Self {
            remaining: total,
            total,
            start_total: total,
            awarded_ledger: 0.0,
            elapsed: None,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn start_total(&self) -> f64 {
        self.start_total
    }

    pub fn awarded_ledger(&self) -> f64 {
        self.awarded_ledger
    }

    pub fn elapsed_hint(&self) -> Option<f64> {
        self.elapsed
    }

    pub fn set_remaining(&mut self, minutes: f64) {
        self.remaining = clamp_minutes(minutes);
    }

    pub fn set_total(&mut self, minutes: f64) {
        self.total = clamp_minutes(minutes);
    }

    /// Apply both readings, total first, and refresh the elapsed hint.
    pub fn set(&mut self, remaining: f64, total: f64) {
        self.set_total(total);
        self.set_remaining(remaining);
        self.elapsed = Some((self.effective_total() - remaining).max(0.0));
    }

    /// Push `delta` minutes into the tracked clock.
    ///
    /// The ceiling is raised to cover the new remaining value. When
    /// `record_to_ledger` is false the delta is treated as engine-originated
    /// and the ledger is left alone.
    pub fn add(&mut self, delta: f64, record_to_ledger: bool) {
        let delta = clamp_finite(delta);
        self.remaining = clamp_minutes(self.remaining + delta);
        self.total = self.total.max(self.remaining);
        if record_to_ledger {
            self.awarded_ledger = clamp_finite(self.awarded_ledger + delta);
        }
    }

    /// `max(baseline + ledger, total, remaining)`.
    pub fn effective_total(&self) -> f64 {
        (self.start_total + self.awarded_ledger)
            .max(self.total)
            .max(self.remaining)
    }

    /// Visible minutes elapsed against the effective total.
    pub fn elapsed(&self) -> f64 {
        (self.effective_total() - self.remaining).max(0.0)
    }

    /// Fraction of time still remaining: 1.0 at match start, 0.0 at the end.
    pub fn remaining_fraction(&self) -> f64 {
        let eff_total = self.effective_total().max(EFFECTIVE_TOTAL_EPSILON);
        (self.remaining.max(0.0) / eff_total).clamp(0.0, 1.0)
    }

    /// Start a new pacing window from the current ceiling.
    pub(crate) fn rebaseline(&mut self) {
        self.start_total = self.total;
        self.remaining = self.total;
        self.awarded_ledger = 0.0;
        self.elapsed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_readings_are_clamped() {
        let mut clock = VisibleClock::new(100.0);
        clock.set_remaining(-5.0);
        clock.set_total(-1.0);
        assert_eq!(clock.remaining(), 0.0);
        assert_eq!(clock.total(), 0.0);
    }

    #[test]
    fn non_finite_readings_stay_finite() {
        let mut clock = VisibleClock::new(f64::NAN);
        assert_eq!(clock.total(), 0.0);

        clock.set_total(f64::INFINITY);
        clock.set_remaining(f64::NAN);
        assert_eq!(clock.total(), f64::MAX);
        assert_eq!(clock.remaining(), 0.0);

        clock.add(f64::INFINITY, true);
        clock.add(f64::INFINITY, true);
        assert_eq!(clock.remaining(), f64::MAX);
        assert_eq!(clock.awarded_ledger(), f64::MAX);

        clock.add(f64::NEG_INFINITY, true);
        assert_eq!(clock.remaining(), 0.0);
        assert!(clock.awarded_ledger().is_finite());
    }

    #[test]
    fn combined_setter_records_elapsed_hint() {
        let mut clock = VisibleClock::new(100.0);
        assert!(clock.elapsed_hint().is_none());
        clock.set(60.0, 100.0);
        assert_eq!(clock.elapsed_hint(), Some(40.0));
    }

    #[test]
    fn ledger_keeps_effective_total_above_shrunken_total() {
        let mut clock = VisibleClock::new(100.0);
        clock.add(10.0, true);
        assert_eq!(clock.remaining(), 110.0);
        assert_eq!(clock.total(), 110.0);
        assert_eq!(clock.awarded_ledger(), 10.0);

        // Engine reports a smaller ceiling than what was granted.
        clock.set(80.0, 90.0);
        assert_eq!(clock.effective_total(), 110.0);
        assert_eq!(clock.elapsed(), 30.0);
    }

    #[test]
    fn unledgered_add_leaves_ledger_alone() {
        let mut clock = VisibleClock::new(100.0);
        clock.add(-30.0, false);
        assert_eq!(clock.remaining(), 70.0);
        assert_eq!(clock.total(), 100.0);
        assert_eq!(clock.awarded_ledger(), 0.0);
    }

    #[test]
    fn negative_add_never_drops_below_zero() {
        let mut clock = VisibleClock::new(10.0);
        clock.add(-50.0, true);
        assert_eq!(clock.remaining(), 0.0);
        assert_eq!(clock.awarded_ledger(), -50.0);
        assert!(clock.elapsed() >= 0.0);
    }

    #[test]
    fn remaining_fraction_handles_zero_clock() {
        let clock = VisibleClock::new(0.0);
        assert_eq!(clock.remaining_fraction(), 0.0);
    }

    #[test]
    fn rebaseline_resets_ledger() {
        let mut clock = VisibleClock::new(100.0);
        clock.add(25.0, true);
        clock.set_remaining(40.0);
        clock.rebaseline();
        assert_eq!(clock.start_total(), 125.0);
        assert_eq!(clock.remaining(), 125.0);
        assert_eq!(clock.awarded_ledger(), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }
}
