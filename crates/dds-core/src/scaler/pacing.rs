//! Pace tracking and milestone-value correction.

use super::config::ScalerConfig;

/// Score a player on linear pace toward `target_win_minutes` should hold
/// after `elapsed` visible minutes.
pub fn expected_score(cfg: &ScalerConfig, elapsed: f64) -> f64 {
    let target_minutes = cfg.target_win_minutes.max(f64::EPSILON);
    let elapsed_for_target = elapsed.max(0.0).min(cfg.target_win_minutes);
    (elapsed_for_target / target_minutes) * cfg.target_score
}

/// Earned score over expected score; 1.0 while nothing is expected yet.
pub fn pace_ratio(cfg: &ScalerConfig, earned: f64, elapsed: f64) -> f64 {
    let expected = expected_score(cfg, elapsed);
    if expected > 0.0 {
        earned / expected
    } else {
        1.0
    }
}

/// Correct `value` for the given pace.
///
/// Ahead of pace decays the value multiplicatively, harder early in the
/// match. Behind pace grows it in proportion to the shortfall, gentler early.
/// The result is clamped to the configured bounds and rounded half-to-even.
pub fn adjust_milestone_value(
    cfg: &ScalerConfig,
    value: f64,
    pace_ratio: f64,
    remaining_fraction: f64,
) -> f64 {
    let t = remaining_fraction.clamp(0.0, 1.0);
    let t_sq = t * t;
    let reduction_strength = cfg.adjustment_rate * (1.0 + t_sq);
    let increase_strength = cfg.adjustment_rate / (1.0 + t_sq);

    let adjusted = if pace_ratio > 1.0 {
        value * (1.0 / pace_ratio).powf(reduction_strength)
    } else if pace_ratio < 1.0 {
        value * (1.0 + increase_strength * (1.0 - pace_ratio))
    } else {
        value
    };

    cfg.clamp_milestone_value(adjusted).round_ties_even()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_expected_at_zero_elapsed() {
        let cfg = ScalerConfig::default();
        assert_eq!(expected_score(&cfg, 0.0), 0.0);
        assert_eq!(pace_ratio(&cfg, 50.0, 0.0), 1.0);
    }

    #[test]
    fn expected_score_saturates_at_target_minutes() {
        let cfg = ScalerConfig::default();
        assert_eq!(expected_score(&cfg, 200.0), 50.0);
        assert_eq!(expected_score(&cfg, 400.0), 100.0);
        assert_eq!(expected_score(&cfg, 900.0), 100.0);
    }

    #[test]
    fn on_pace_leaves_value_unchanged() {
        let cfg = ScalerConfig::default();
        assert_eq!(adjust_milestone_value(&cfg, 10.0, 1.0, 0.5), 10.0);
    }

    #[test]
    fn ahead_of_pace_reduces_more_early() {
        let cfg = ScalerConfig::default();
        let early = adjust_milestone_value(&cfg, 20.0, 4.0, 1.0);
        let late = adjust_milestone_value(&cfg, 20.0, 4.0, 0.0);
        // 20 * 0.25^0.5 = 10 ; 20 * 0.25^0.25 ~= 14.14
        assert_eq!(early, 10.0);
        assert_eq!(late, 14.0);
    }

    #[test]
    fn behind_pace_increases_more_late() {
        let cfg = ScalerConfig::default();
        let early = adjust_milestone_value(&cfg, 10.0, 0.0, 1.0);
        let late = adjust_milestone_value(&cfg, 10.0, 0.0, 0.0);
        // 10 * (1 + 0.125) = 11.25 ; 10 * 1.25 = 12.5 -> 12 (ties to even)
        assert_eq!(early, 11.0);
        assert_eq!(late, 12.0);
    }

    #[test]
    fn result_is_clamped() {
        let cfg = ScalerConfig::default();
        assert_eq!(adjust_milestone_value(&cfg, 1.0, 1000.0, 1.0), 1.0);
        assert_eq!(adjust_milestone_value(&cfg, 20.0, 0.0, 0.0), 20.0);
    }
}
