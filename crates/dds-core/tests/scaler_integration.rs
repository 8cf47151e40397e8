//! Integration tests for the scaler's engine-facing contract.

use dds_core::{DifficultyScaler, ScalerConfig};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn first_milestone_on_a_full_clock() {
    let mut scaler = DifficultyScaler::new();
    scaler.set_visible_time(100.0, 100.0);

    let expected = scaler.calculate_time_reward();
    let bonus = scaler.complete_milestone();

    assert_eq!(scaler.progress(), 10.0);
    assert!(approx(bonus, expected));
    assert!(approx(bonus, 1.0));
}

#[test]
fn late_game_override_ignores_other_state() {
    let mut scaler = DifficultyScaler::new();
    scaler.set_visible_time(15.0, 100.0);
    assert_eq!(scaler.calculate_time_reward(), 20.0);

    scaler.set_progress(95.0);
    scaler.add_visible_time(500.0, true);
    scaler.set_visible_time_remaining(15.0);
    assert_eq!(scaler.calculate_time_reward(), 20.0);
}

#[test]
fn cap_interpolates_at_forty_minutes() {
    // With a tiny remaining fraction the quadratic curve exceeds every cap,
    // so the reward equals the cap itself.
    let mut scaler = DifficultyScaler::new();
    scaler.set_visible_time(40.0, 10_000.0);
    assert!(approx(scaler.calculate_time_reward(), 12.5));
}

#[test]
fn reward_never_exceeds_high_cap_with_plenty_of_time() {
    let mut scaler = DifficultyScaler::new();
    for remaining in [50.0, 60.0, 99.0] {
        scaler.set_visible_time(remaining, 1_000.0);
        assert!(scaler.calculate_time_reward() <= 5.0);
    }
}

#[test]
fn engine_applies_bonus_then_adjusts() {
    let mut scaler = DifficultyScaler::new();

    // 20 minutes in, player has already banked two milestones.
    scaler.set_visible_time(80.0, 100.0);
    scaler.complete_milestone();
    let bonus = scaler.complete_milestone();
    assert_eq!(scaler.progress(), 20.0);

    scaler.add_visible_time(bonus, true);
    assert!(approx(scaler.awarded_time_ledger(), bonus));

    // Engine reflects the new clock back.
    let remaining = scaler.visible_time_remaining();
    let total = scaler.visible_total_time();
    scaler.set_visible_time(remaining, total);

    // 20 minutes elapsed -> 5 points expected, 20 earned: well ahead.
    let value = scaler.update_milestone_value();
    assert!(value < 10);
    assert!(value >= 1);
}

#[test]
fn elapsed_survives_engine_shrinking_its_clock() {
    let mut scaler = DifficultyScaler::new();
    scaler.add_visible_time(30.0, true);
    scaler.set_visible_time(120.0, 50.0);

    assert_eq!(scaler.effective_total(), 130.0);
    assert_eq!(scaler.visible_elapsed(), Some(10.0));
    assert_eq!(scaler.game_state().time_elapsed, 10.0);
}

#[test]
fn custom_tuning_changes_pacing() {
    let cfg = ScalerConfig {
        target_score: 50.0,
        target_win_minutes: 50.0,
        ..ScalerConfig::default()
    };
    let mut scaler = DifficultyScaler::with_config(cfg);
    scaler.set_visible_time(75.0, 100.0);
    scaler.set_progress(25.0);
    // 25 minutes elapsed of a 50-minute target: exactly on pace.
    assert!(approx(scaler.pace_ratio(), 1.0));
    assert_eq!(scaler.update_milestone_value(), 10);
}

#[test]
fn milestone_value_reaches_bounds_under_sustained_pressure() {
    let mut scaler = DifficultyScaler::new();
    scaler.set_visible_time(50.0, 100.0);
    scaler.set_progress(1_000.0);
    for _ in 0..50 {
        scaler.update_milestone_value();
    }
    assert_eq!(scaler.milestone_value(), 1);

    let mut scaler = DifficultyScaler::new();
    scaler.set_visible_time(50.0, 100.0);
    for _ in 0..50 {
        scaler.update_milestone_value();
    }
    assert_eq!(scaler.milestone_value(), 20);
}

#[test]
fn floor_value_holds_when_growth_rounds_away() {
    // 1 * (1 + 0.2) rounds back to 1: a value pinned at the floor needs a
    // growth factor of at least 1.5 to move.
    let mut scaler = DifficultyScaler::new();
    scaler.set_visible_time(50.0, 100.0);
    scaler.set_progress(1_000.0);
    for _ in 0..10 {
        scaler.update_milestone_value();
    }
    scaler.set_progress(0.0);
    assert_eq!(scaler.update_milestone_value(), 1);
}
