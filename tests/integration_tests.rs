//! Integration tests for the fmdt binary

#![allow(deprecated)] // cargo_bin is the standard way to test CLI binaries

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `fmdt` with config, cache and credentials isolated in `home`
fn fmdt(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fmdt").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("XDG_CACHE_HOME", home.path().join(".cache"))
        .env_remove("AZURE_DEVOPS_ORG")
        .env_remove("AZURE_DEVOPS_PROJECT")
        .env_remove("AZURE_DEVOPS_PAT")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// CLI Tests
// =============================================================================

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("fmdt").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Azure DevOps repositories"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("fmdt").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_status_help() {
    let mut cmd = Command::cargo_bin("fmdt").unwrap();
    cmd.args(["status", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--org"));
}

#[test]
fn test_branches_help() {
    let mut cmd = Command::cargo_bin("fmdt").unwrap();
    cmd.args(["branches", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--refresh"))
        .stdout(predicate::str::contains("--limit"));
}

#[test]
fn test_status_requires_branch() {
    let mut cmd = Command::cargo_bin("fmdt").unwrap();
    cmd.arg("status");

    cmd.assert().failure();
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("fmdt").unwrap();
    cmd.arg("submit");

    cmd.assert().failure();
}

// =============================================================================
// Command behavior without a network
// =============================================================================

#[test]
fn test_blank_branch_rejected_before_any_setup() {
    let home = TempDir::new().unwrap();

    fmdt(&home)
        .args(["status", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch name must not be empty"));
}

#[test]
fn test_status_without_organization_fails() {
    let home = TempDir::new().unwrap();

    fmdt(&home)
        .env("AZURE_DEVOPS_PAT", "secret")
        .args(["status", "feature/login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no organization configured"));
}

#[test]
fn test_status_without_project_fails() {
    let home = TempDir::new().unwrap();

    fmdt(&home)
        .env("AZURE_DEVOPS_PAT", "secret")
        .env("AZURE_DEVOPS_ORG", "contoso")
        .args(["status", "feature/login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no project configured"));
}

#[test]
fn test_empty_history() {
    let home = TempDir::new().unwrap();

    fmdt(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No branches searched yet"));
}

#[test]
fn test_history_lists_saved_branches() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("fmdt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("history.toml"),
        "branches = [\"feature/login\", \"bugfix/crash\"]\n",
    )
    .unwrap();

    fmdt(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("feature/login"))
        .stdout(predicate::str::contains("bugfix/crash"));
}

#[test]
fn test_history_clear() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("fmdt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("history.toml"), "branches = [\"feature/login\"]\n").unwrap();

    fmdt(&home)
        .args(["history", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared"));

    fmdt(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No branches searched yet"));
}
