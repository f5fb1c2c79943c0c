//! Integration tests for the command-line front end

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[allow(deprecated)]
fn booking() -> Command {
    let mut cmd = Command::cargo_bin("conference-booking").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("BOOKING_CONFIG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    booking()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("simulate"));
}

#[test]
fn test_catalog_shows_seed_conferences() {
    let temp_dir = TempDir::new().unwrap();

    booking()
        .current_dir(&temp_dir)
        .args(["--no-color", "catalog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Go Conference 2024"))
        .stdout(predicate::str::contains("DevOps Summit"))
        .stdout(predicate::str::contains("Cloud Native Expo"))
        .stdout(predicate::str::contains("$299.99"));
}

#[test]
fn test_catalog_json() {
    let temp_dir = TempDir::new().unwrap();

    let output = booking()
        .current_dir(&temp_dir)
        .args(["--json", "catalog"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 3);
    assert_eq!(json["conferences"][0]["conference"]["id"], "conf-1");
    assert_eq!(json["conferences"][0]["stats"]["reserved_count"], 0);
}

#[test]
fn test_config_show_reads_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[engine]\nhold_duration_secs = 42").unwrap();

    booking()
        .current_dir(&temp_dir)
        .args(["--json", "--config"])
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hold_duration_secs\": 42"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    booking()
        .current_dir(&temp_dir)
        .args(["--no-color", "--config", "nope.toml", "catalog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_simulate_holds_invariant() {
    let temp_dir = TempDir::new().unwrap();

    let output = booking()
        .current_dir(&temp_dir)
        .args([
            "--json",
            "simulate",
            "--conference",
            "conf-2",
            "--requesters",
            "60",
            "--tickets",
            "3",
            "--confirm-every",
            "2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["invariant_holds"], true);
    assert_eq!(report["requesters"], 60);
    assert_eq!(report["total_tickets"], 75);
}

#[test]
fn test_simulate_unknown_conference_json_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = booking()
        .current_dir(&temp_dir)
        .args(["--json", "simulate", "--conference", "conf-9"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let error: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(error["status"], "error");
    assert_eq!(error["kind"], "not_found");
    assert_eq!(error["recoverable"], false);
}
