use assert_cmd::Command;
use predicates::prelude::*;

// Monday 12:00-17:00 and 08:00-12:00 (unsorted, touching), Friday 20:00-Saturday 03:00.
const HOURS: &str =
    r#"{"timezone_id":"Europe/Berlin","intervals":[[43200,61200],[28800,43200],[417600,442800]]}"#;

fn hours() -> Command {
    Command::cargo_bin("hours").unwrap()
}

#[test]
fn test_normalize_merges_and_sorts() {
    let output = hours()
        .args(["normalize", "-"])
        .write_stdin(HOURS)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["timezone_id"], "Europe/Berlin");
    assert_eq!(
        json["intervals"],
        serde_json::json!([[28800, 61200], [417600, 442800]])
    );
}

#[test]
fn test_day_prints_week_ranges() {
    hours()
        .args(["day", "-", "mon"])
        .write_stdin(HOURS)
        .assert()
        .success()
        .stdout("Mon 08:00-17:00\n");
}

#[test]
fn test_day_shows_spillover_past_midnight() {
    hours()
        .args(["day", "-", "4"])
        .write_stdin(HOURS)
        .assert()
        .success()
        .stdout("Fri 20:00-03:00+1\n");
}

#[test]
fn test_set_day_replaces_only_that_day() {
    let output = hours()
        .args(["set-day", "-", "tue", "09:00-12:00", "13:00-18:00"])
        .write_stdin(HOURS)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["intervals"],
        serde_json::json!([
            [28800, 61200],
            [118800, 129600],
            [133200, 151200],
            [417600, 442800]
        ])
    );
}

#[test]
fn test_clear_day() {
    let output = hours()
        .args(["clear-day", "-", "fri"])
        .write_stdin(HOURS)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["intervals"], serde_json::json!([[28800, 61200]]));
}

#[test]
fn test_status_open() {
    hours()
        .args(["status", "-", "mon", "10:00"])
        .write_stdin(HOURS)
        .assert()
        .success()
        .stdout(predicate::str::contains("open\ncloses Mon 17:00"));
}

#[test]
fn test_status_closed_until_next_week() {
    hours()
        .args(["status", "-", "sat", "10:00"])
        .write_stdin(HOURS)
        .assert()
        .success()
        .stdout(predicate::str::contains("closed\nopens Mon 08:00 (next week)"));
}

#[test]
fn test_invalid_day_fails() {
    hours()
        .args(["day", "-", "8"])
        .write_stdin(HOURS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid day"));
}

#[test]
fn test_invalid_range_fails() {
    hours()
        .args(["set-day", "-", "mon", "18:00-09:00"])
        .write_stdin(HOURS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid range"));
}

#[test]
fn test_malformed_json_fails() {
    hours()
        .args(["normalize", "-"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load working hours"));
}

#[test]
fn test_missing_file_fails() {
    hours()
        .args(["normalize", "/nonexistent/hours.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_status_rejects_bad_time() {
    hours()
        .args(["status", "-", "mon", "25:00"])
        .write_stdin(HOURS)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time '25:00'"));
}

const CATALOG: &str = r#"[{"id":"Europe/Berlin","name":"Berlin","utc_offset":3600}]"#;

fn hours_file(name: &str, json: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("hours-cli-{}-{name}.json", std::process::id()));
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_timezone_prints_label() {
    let path = hours_file("known", HOURS);
    hours()
        .arg("timezone")
        .arg(&path)
        .arg("-")
        .write_stdin(CATALOG)
        .assert()
        .success()
        .stdout("(UTC+01:00) Berlin\n");
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_timezone_unknown_fails() {
    let path = hours_file("unknown", r#"{"timezone_id":"Mars/Olympus","intervals":[]}"#);
    hours()
        .arg("timezone")
        .arg(&path)
        .arg("-")
        .write_stdin(CATALOG)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mars/Olympus"));
    std::fs::remove_file(path).unwrap();
}
