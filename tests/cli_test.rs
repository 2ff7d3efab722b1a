//! Integration tests for CLI argument parsing.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Scaffold app projects"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_new_requires_path() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.arg("new");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_new_rejects_template_with_example() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.args([
        "new",
        "my-app",
        "--template",
        "starter",
        "--example",
        "with-router",
    ]);
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_new_fails_fast_on_conflicting_destination() -> Result<(), Box<dyn std::error::Error>> {
    // The destination precondition runs before any network access, so this
    // must fail even with an unreachable template.
    let temp = TempDir::new()?;
    let dest = temp.path().join("occupied");
    fs::create_dir(&dest)?;
    fs::write(dest.join("index.js"), "console.log(1);")?;

    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.env("CI", "1");
    cmd.args(["new", dest.to_str().unwrap(), "--template", "starter"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("conflicting files"));
    Ok(())
}

#[test]
fn cli_cache_list_succeeds_on_fresh_cache() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("yurt"));
    // Point the cache root into the sandbox (dirs honors XDG on Linux).
    cmd.env("XDG_CACHE_HOME", temp.path());
    cmd.env("CI", "1");
    cmd.args(["cache", "list"]);
    cmd.assert().success();
    Ok(())
}

#[test]
fn cli_cache_clear_force_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.env("XDG_CACHE_HOME", temp.path());
    cmd.env("CI", "1");
    cmd.args(["cache", "clear", "--force"]);
    cmd.assert().success();
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("yurt"));
    Ok(())
}

#[test]
fn cli_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.args(["--debug", "--help"]);
    cmd.assert().success();
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("yurt"));
    cmd.arg("invalid-command");
    cmd.assert().failure();
    Ok(())
}
