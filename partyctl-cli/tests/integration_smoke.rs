//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

// === Party Command Tests ===

#[test]
fn test_list_help() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("list").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Output format"));
}

#[test]
fn test_rename_help() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("rename").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("New display name"));
}

#[test]
fn test_moves_help() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("moves").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Moves to select"));
}

#[test]
fn test_delete_help() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("delete").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Party member ID"));
}

#[test]
fn test_tui_help() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("tui").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Interactive party view"));
}

#[test]
fn test_rename_requires_name() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("rename").arg("1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("<NAME>"));
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("--endpoint").arg("ftp://party.example").arg("list");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid endpoint"));
}

// === Config Command Tests ===

#[test]
fn test_config_help() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("config").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Show config file path"));
}

#[test]
fn test_config_path() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// === Completions Tests ===

#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("partyctl"));
}

// === Global Flag Tests ===

#[test]
fn test_global_flags_in_help() {
    let mut cmd = Command::cargo_bin("partyctl").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--endpoint"))
        .stdout(predicate::str::contains("--no-sound"));
}
