use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A system under test that delegates to the reference evaluator
fn faithful_binary(dir: &TempDir) -> PathBuf {
    script(
        dir,
        "faithful",
        &format!("exec '{}' eval \"$1\"", env!("CARGO_BIN_EXE_exprfuzz")),
    )
}

#[test]
#[serial]
fn test_cli_run_faithful_binary_passes() {
    let temp_dir = TempDir::new().unwrap();
    let binary = faithful_binary(&temp_dir);

    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("run")
        .arg("--binary")
        .arg(&binary)
        .arg("--seed")
        .arg("2020")
        .arg("--skip-undefined");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("RESULT == CONTROL\n"))
        .stdout(predicate::str::contains("FAILED:").not());
}

#[test]
#[serial]
fn test_cli_run_wrong_constant_fails_first_comparison() {
    let temp_dir = TempDir::new().unwrap();
    let binary = script(&temp_dir, "constant", "echo 1000000");

    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("run")
        .arg("--binary")
        .arg(&binary)
        .arg("--seed")
        .arg("17")
        .arg("--skip-undefined");

    let assert = cmd.assert().code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 4, "{}", stdout);
    assert_eq!(lines[0], "RESULT == CONTROL");
    assert!(lines[1].starts_with("1000000 == "), "{}", stdout);
    assert_eq!(lines[2], "FAILED:");
    assert!(!lines[3].is_empty());
}

#[test]
#[serial]
fn test_cli_run_iterations_and_json() {
    let temp_dir = TempDir::new().unwrap();
    let binary = faithful_binary(&temp_dir);

    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("run")
        .arg("--binary")
        .arg(&binary)
        .arg("--iterations")
        .arg("5")
        .arg("--seed")
        .arg("1")
        .arg("--skip-undefined")
        .arg("--format")
        .arg("json");

    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.lines().count() <= 5);
    for line in stdout.lines() {
        assert!(line.starts_with('{') && line.contains("\"passed\":true"), "{}", line);
    }
}

#[test]
#[serial]
fn test_cli_run_non_numeric_output_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let binary = script(&temp_dir, "chatty", "echo hello");

    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("run")
        .arg("--binary")
        .arg(&binary)
        .arg("--skip-undefined");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("is not a number"));
}

#[test]
#[serial]
fn test_cli_run_missing_binary() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("run")
        .arg("--binary")
        .arg(temp_dir.path().join("nonexistent"))
        .arg("--skip-undefined");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to spawn"));
}

#[test]
#[serial]
fn test_cli_run_timeout() {
    let temp_dir = TempDir::new().unwrap();
    let binary = script(&temp_dir, "hang", "exec sleep 30");

    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("run")
        .arg("--binary")
        .arg(&binary)
        .arg("--timeout-ms")
        .arg("200")
        .arg("--skip-undefined");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("did not exit within 200ms"));
}

/// First seed whose default run divides by zero in the reference evaluator
fn seed_with_division_by_zero() -> u64 {
    use exprfuzz::{
        evaluate_str, FuzzConfig, FuzzError, ReferenceLimits, ReportFormat, Reporter, Runner,
    };

    let mut reference = |expression: &str| {
        evaluate_str(expression, &ReferenceLimits::default()).map(|value| value.to_string())
    };
    (0..5_000)
        .find(|&seed| {
            let mut runner = Runner::new(FuzzConfig {
                seed: Some(seed),
                ..FuzzConfig::default()
            });
            let mut reporter = Reporter::new(std::io::sink(), ReportFormat::Text);
            matches!(
                runner.run(&mut reference, &mut reporter),
                Err(FuzzError::DivisionByZero(_))
            )
        })
        .expect("no seed below 5000 divides by zero")
}

#[test]
#[serial]
fn test_cli_run_division_by_zero_is_fatal_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let binary = faithful_binary(&temp_dir);
    let seed = seed_with_division_by_zero();

    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("run")
        .arg("--binary")
        .arg(&binary)
        .arg("--seed")
        .arg(seed.to_string());

    cmd.assert()
        .code(2)
        .stdout(predicate::str::starts_with("RESULT == CONTROL\n"))
        .stdout(predicate::str::contains("FAILED:").not())
        .stderr(predicate::str::contains("Division by zero"));
}
