use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;

#[test]
#[serial]
fn test_cli_eval_respects_precedence() {
    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("eval").arg("5 + 3 * 2");

    cmd.assert().success().stdout("11\n");
}

#[test]
#[serial]
fn test_cli_eval_true_division() {
    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("eval").arg("(2 - 7) / 5");

    cmd.assert().success().stdout("-1.0\n");
}

#[test]
#[serial]
fn test_cli_eval_strips_single_quotes() {
    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("eval").arg("'-5 * (3 + -8)'");

    cmd.assert().success().stdout("25\n");
}

#[test]
#[serial]
fn test_cli_eval_leading_negative_operand() {
    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("eval").arg("-7 / 2");

    cmd.assert().success().stdout("-3.5\n");
}

#[test]
#[serial]
fn test_cli_eval_division_by_zero() {
    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("eval").arg("1 / (3 - 3)");

    cmd.assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
#[serial]
fn test_cli_eval_parse_error() {
    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("eval").arg("1 + * 2");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
#[serial]
fn test_cli_eval_empty_expression() {
    let mut cmd = Command::cargo_bin("exprfuzz").unwrap();
    cmd.arg("eval").arg("");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Parse error"));
}
