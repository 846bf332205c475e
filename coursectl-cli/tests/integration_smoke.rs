//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn coursectl() -> Command {
    let mut cmd = Command::cargo_bin("coursectl").unwrap();
    // Keep the host environment from leaking into argument parsing
    for var in [
        "DATABASE_URL",
        "SERVER_BIND",
        "LOG_LEVEL",
        "LOG_FORMAT",
        "CORS_ALLOW_CREDENTIALS",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    coursectl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("reset"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_serve_help() {
    coursectl()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--in-memory"))
        .stdout(predicate::str::contains("SERVER_BIND"));
}

#[test]
fn test_stats_help() {
    coursectl()
        .arg("stats")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Print counts as JSON"));
}

#[test]
fn test_reset_requires_confirmation() {
    coursectl()
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_invalid_bind_address_rejected() {
    coursectl()
        .args(["serve", "--in-memory", "--bind", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_version() {
    coursectl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("coursectl"));
}
