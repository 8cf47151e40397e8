//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "dds-cli", "--"])
        .args(args)
        .env("DDS_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_on_fresh_state() {
    let dir = TempDir::new().unwrap();
    let status = run_json(dir.path(), &["scaler", "status"]);
    assert_eq!(status["earned_score"], 0.0);
    assert_eq!(status["milestone_value"], 10);
    assert_eq!(status["time_reward"], 1.0);
}

#[test]
fn test_complete_persists_between_invocations() {
    let dir = TempDir::new().unwrap();
    let event = run_json(dir.path(), &["scaler", "complete"]);
    assert_eq!(event["type"], "MilestoneCompleted");
    assert_eq!(event["earned_score"], 10.0);
    assert_eq!(event["time_bonus"], 1.0);

    let status = run_json(dir.path(), &["scaler", "status"]);
    assert_eq!(status["earned_score"], 10.0);
    assert!(dir.path().join("game_state.json").exists());
}

#[test]
fn test_set_time_then_reward_override() {
    let dir = TempDir::new().unwrap();
    let event = run_json(dir.path(), &["scaler", "set-time", "15", "100"]);
    assert_eq!(event["type"], "ClockUpdated");
    assert_eq!(event["remaining"], 15.0);

    let reward = run_json(dir.path(), &["scaler", "reward"]);
    assert_eq!(reward["time_reward"], 20.0);
}

#[test]
fn test_add_time_accepts_negative_delta() {
    let dir = TempDir::new().unwrap();
    let event = run_json(dir.path(), &["scaler", "add-time", "-30", "--no-ledger"]);
    assert_eq!(event["type"], "TimeAdded");
    assert_eq!(event["remaining"], 70.0);
    assert_eq!(event["awarded_time_ledger"], 0.0);
}

#[test]
fn test_update_reports_adjustment() {
    let dir = TempDir::new().unwrap();
    run_json(dir.path(), &["scaler", "set-time", "60", "100"]);
    run_json(dir.path(), &["scaler", "set-progress", "40"]);
    let event = run_json(dir.path(), &["scaler", "update"]);
    assert_eq!(event["type"], "MilestoneValueAdjusted");
    assert_eq!(event["from"], 10);
    assert!(event["to"].as_i64().unwrap() < 10);
}

#[test]
fn test_load_missing_snapshot_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let event = run_json(dir.path(), &["scaler", "load", missing.to_str().unwrap()]);
    assert_eq!(event["type"], "StateLoaded");
    assert_eq!(event["found"], false);
}

#[test]
fn test_malformed_state_file_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("game_state.json"), "{ broken").unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["scaler", "status"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_and_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "scaler.target_score"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "100.0");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "scaler.target_score", "250"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "scaler.target_score"]);
    assert_eq!(stdout.trim(), "250.0");
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "scaler.bogus", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_simulate_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let a = run_json(dir.path(), &["simulate", "--seed", "9"]);
    let b = run_json(dir.path(), &["simulate", "--seed", "9"]);
    assert_eq!(a["outcome"], b["outcome"]);
    assert_eq!(a["metrics"]["final_score"], b["metrics"]["final_score"]);
    assert_eq!(a["trace"].as_array().unwrap().len(), 0);
}

#[test]
fn test_set_progress_clamps_negative_score() {
    let dir = TempDir::new().unwrap();
    let event = run_json(dir.path(), &["scaler", "set-progress", "-5"]);
    assert_eq!(event["type"], "ProgressSet");
    assert_eq!(event["earned_score"], 0.0);
}

#[test]
fn test_simulate_minutes_sets_match_length() {
    let dir = TempDir::new().unwrap();
    let result = run_json(
        dir.path(),
        &["simulate", "--minutes", "30", "--skill", "10000", "--jitter", "0"],
    );
    assert_eq!(result["scenario"]["scaler"]["visible_total_time"], 30.0);
    assert_eq!(result["outcome"], "clock_expired");
    assert_eq!(result["metrics"]["minutes_played"], 30.0);
}

#[test]
fn test_simulate_max_minutes_caps_match() {
    let dir = TempDir::new().unwrap();
    let result = run_json(
        dir.path(),
        &["simulate", "--max-minutes", "10", "--skill", "10000"],
    );
    assert_eq!(result["outcome"], "minute_cap_reached");
}

#[test]
fn test_simulate_rejects_zero_tick_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.json");
    let (_, _, code) = run_cli(dir.path(), &["simulate", "--export", path.to_str().unwrap()]);
    assert_eq!(code, 0);

    let mut scenario: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    scenario["tick_minutes"] = serde_json::json!(0.0);
    std::fs::write(&path, scenario.to_string()).unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["simulate", "--scenario", path.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("tick_minutes"));
}
