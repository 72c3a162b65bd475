//! Basic CLI E2E tests.
//!
//! Each test gets its own data directory so runs do not share a database.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command against `data_dir` and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_mindcare-cli"))
        .args(args)
        .env("MINDCARE_DATA_DIR", data_dir)
        .env_remove("MINDCARE_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

#[test]
fn test_stats_start_at_zero() {
    let dir = tempfile::tempdir().unwrap();
    let stats = run_json(dir.path(), &["stats"]);
    assert_eq!(stats["streak_count"], 0);
    assert_eq!(stats["sessions_total"], 0);
}

#[test]
fn test_plan_check_counts_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let update = run_json(dir.path(), &["plan", "check", "wednesday", "2"]);
    assert_eq!(update["completed"], true);
    assert_eq!(update["progress"]["completed"], 1);
    assert_eq!(update["session"]["ledger"]["sessions_total"], 1);

    let stats = run_json(dir.path(), &["stats"]);
    assert_eq!(stats["sessions_total"], 1);
    assert_eq!(stats["streak_count"], 1);

    let view = run_json(dir.path(), &["plan", "show", "wednesday"]);
    assert_eq!(view["tasks"][2]["completed"], true);
    assert_eq!(view["tasks"].as_array().unwrap().len(), 4);
}

#[test]
fn test_plan_rejects_bad_day_and_index() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["plan", "check", "funday", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (code, _, _) = run_cli(dir.path(), &["plan", "check", "monday", "4"]);
    assert_eq!(code, 1);

    let stats = run_json(dir.path(), &["stats"]);
    assert_eq!(stats["sessions_total"], 0);
}

#[test]
fn test_plan_week_has_seven_days() {
    let dir = tempfile::tempdir().unwrap();
    let week = run_json(dir.path(), &["plan", "week"]);
    let days = week.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"], "sunday");
}

#[test]
fn test_gratitude_save_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let saved = run_json(dir.path(), &["gratitude", "save", "tea", "sun", "friends"]);
    assert_eq!(saved["entry"]["gratitudes"][0], "tea");

    let history = run_json(dir.path(), &["gratitude", "list"]);
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test]
fn test_gratitude_blank_item_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["gratitude", "save", "tea", " ", "friends"]);
    assert_eq!(code, 1);

    let history = run_json(dir.path(), &["gratitude", "list"]);
    assert!(history.as_array().unwrap().is_empty());
}

#[test]
fn test_goal_add_and_toggle() {
    let dir = tempfile::tempdir().unwrap();
    let goals = run_json(dir.path(), &["goal", "list"]);
    assert_eq!(goals.as_array().unwrap().len(), 2);

    let goal = run_json(dir.path(), &["goal", "add", "Walk daily"]);
    let id = goal["id"].as_i64().unwrap().to_string();
    assert_eq!(goal["completed"], false);

    let toggled = run_json(dir.path(), &["goal", "toggle", &id]);
    assert_eq!(toggled["completed"], true);

    let goals = run_json(dir.path(), &["goal", "list"]);
    assert_eq!(goals.as_array().unwrap().len(), 3);
}

#[test]
fn test_goal_toggle_unknown_is_null() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_json(dir.path(), &["goal", "toggle", "999"]);
    assert!(result.is_null());
}

#[test]
fn test_mood_and_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let logged = run_json(dir.path(), &["mood", "not-good"]);
    assert_eq!(logged["mood"], "Not Good");

    let dashboard = run_json(dir.path(), &["dashboard"]);
    assert_eq!(dashboard["current_mood"], "Not Good");
    assert_eq!(dashboard["sessions_total"], 1);
    assert_eq!(dashboard["first_name"], "Alex");

    let (code, _, _) = run_cli(dir.path(), &["mood", "ecstatic"]);
    assert_eq!(code, 1);
}

#[test]
fn test_activity_launch() {
    let dir = tempfile::tempdir().unwrap();
    let launch = run_json(dir.path(), &["activity", "grounding"]);
    assert_eq!(launch["activity"], "grounding");
    assert!(launch["url"].as_str().unwrap().starts_with("https://"));
}

#[test]
fn test_profile_and_theme() {
    let dir = tempfile::tempdir().unwrap();
    let profile = run_json(dir.path(), &["profile", "set", "name", "Jordan Lee"]);
    assert_eq!(profile["name"], "Jordan Lee");

    let (code, stdout, _) = run_cli(dir.path(), &["theme", "get"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "light");

    let (code, _, _) = run_cli(dir.path(), &["theme", "set", "dark"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["theme", "get"]);
    assert_eq!(stdout.trim(), "dark");
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "breathing.cycles"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "4");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "breathing.cycles", "2"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "breathing.cycles"]);
    assert_eq!(stdout.trim(), "2");

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "nonexistent.key"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_sections_list_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "breathing.hold_secs", "7"]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "profile.name", "Sam"]);
    assert_eq!(code, 0);

    let breathing = run_json(dir.path(), &["config", "list", "breathing"]);
    assert_eq!(breathing["hold_secs"], 7);
    assert!(breathing.get("name").is_none());

    let profile = run_json(dir.path(), &["config", "reset", "profile"]);
    assert_eq!(profile["name"], "Alex");

    let all = run_json(dir.path(), &["config", "list"]);
    assert_eq!(all["breathing"]["hold_secs"], 7);
    assert_eq!(all["profile"]["name"], "Alex");

    let (code, _, _) = run_cli(dir.path(), &["config", "list", "theme"]);
    assert_ne!(code, 0);
}

#[test]
fn test_breathe_refuses_exercise_with_nothing_to_run() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "breathing.cycles", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("at least 1"));

    let (code, _, _) = run_cli(dir.path(), &["breathe", "--cycles", "0"]);
    assert_eq!(code, 1);

    // A hand-edited file bypasses `config set`.
    std::fs::write(dir.path().join("config.toml"), "[breathing]\ncycles = 0\n").unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["breathe"]);
    assert_eq!(code, 1);
    assert!(!stdout.contains("finished"));

    let stats = run_json(dir.path(), &["stats"]);
    assert_eq!(stats["sessions_total"], 0);
    assert_eq!(stats["streak_count"], 0);
}

#[test]
fn test_breathe_finished_exercise_counts() {
    let dir = tempfile::tempdir().unwrap();
    for (key, value) in [
        ("breathing.inhale_secs", "1"),
        ("breathing.hold_secs", "0"),
        ("breathing.exhale_secs", "0"),
    ] {
        let (code, _, stderr) = run_cli(dir.path(), &["config", "set", key, value]);
        assert_eq!(code, 0, "{stderr}");
    }

    let (code, stdout, stderr) = run_cli(dir.path(), &["breathe", "--cycles", "1"]);
    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.contains("\"inhale\""));
    assert!(stdout.contains("\"finished\""));

    let stats = run_json(dir.path(), &["stats"]);
    assert_eq!(stats["sessions_total"], 1);
}
