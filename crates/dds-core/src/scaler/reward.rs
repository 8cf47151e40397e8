//! Time-reward curve.
//!
//! A milestone earns `normal + (low - normal) * (1 - t)^2` minutes, where `t`
//! is the fraction of time remaining, clamped between the floor and a cap
//! that depends on absolute minutes left. Below
//! [`LATE_GAME_OVERRIDE_MINUTES`] the full late-game reward is granted
//! unconditionally.

use super::config::ScalerConfig;

/// Below this many minutes remaining every milestone earns `low_time_reward`.
pub const LATE_GAME_OVERRIDE_MINUTES: f64 = 20.0;

/// Reward ceiling for `remaining` absolute minutes.
///
/// `high_time_cap` at or above the high threshold, `low_time_reward` at or
/// below the low threshold, linear in between.
pub fn reward_cap(cfg: &ScalerConfig, remaining: f64) -> f64 {
    if remaining >= cfg.high_time_threshold {
        cfg.high_time_cap
    } else if remaining <= cfg.low_time_threshold {
        cfg.low_time_reward
    } else {
        let span = (cfg.high_time_threshold - cfg.low_time_threshold).max(1e-9);
        // 0 at the high threshold, 1 at the low one
        let frac = (cfg.high_time_threshold - remaining) / span;
        cfg.high_time_cap + (cfg.low_time_reward - cfg.high_time_cap) * frac
    }
}

/// Minutes to grant for a milestone completed with `remaining` minutes on the
/// clock and `remaining_fraction` of the effective total left.
pub fn time_reward(cfg: &ScalerConfig, remaining: f64, remaining_fraction: f64) -> f64 {
    let remaining = remaining.max(0.0);
    if remaining < LATE_GAME_OVERRIDE_MINUTES {
        return cfg.low_time_reward;
    }

    let cap = reward_cap(cfg, remaining);
    let t = remaining_fraction.clamp(0.0, 1.0);
    let base = cfg.normal_time_reward;
    let reward = base + (cfg.low_time_reward - base) * (1.0 - t).powi(2);

    base.max(reward.min(cap))
}
