//! Basic CLI surface tests: help, version, argument validation

use assert_cmd::Command;
use predicates::str as pred_str;

fn spaceman() -> Command {
    Command::cargo_bin("spaceman").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    spaceman()
        .arg("--help")
        .assert()
        .success()
        .stdout(pred_str::contains("init"))
        .stdout(pred_str::contains("edit"))
        .stdout(pred_str::contains("run"))
        .stdout(pred_str::contains("clean"));
}

#[test]
fn test_version() {
    spaceman()
        .arg("--version")
        .assert()
        .success()
        .stdout(pred_str::contains("spaceman"));
}

#[test]
fn test_no_arguments_shows_usage_error() {
    spaceman()
        .assert()
        .failure()
        .stderr(pred_str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_fails() {
    spaceman().arg("teleport").assert().failure();
}

#[test]
fn test_skip_flag_requires_names() {
    spaceman()
        .args(["run", "--skip"])
        .assert()
        .failure()
        .stderr(pred_str::contains("--skip"));
}
