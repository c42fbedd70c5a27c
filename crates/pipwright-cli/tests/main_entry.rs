//! Integration tests for the `pipwright` binary entry point.
//!
//! Exercises the stdin-to-stdout protocol end to end: a parse operation, the
//! silent no-op for unrecognised functions, and the failure path for
//! malformed input.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::{contains, is_empty};

#[test]
fn parse_requirements_round_trip() {
    let mut command = cargo_bin_cmd!("pipwright");
    command.write_stdin(r#"{"function": "parse_requirements", "args": ["requests==2.0"]}"#);
    command
        .assert()
        .success()
        .stdout(contains(r#""name":"requests""#));
}

#[test]
fn hash_operation_prints_a_bare_digest() {
    let mut command = cargo_bin_cmd!("pipwright");
    command.write_stdin(r#"{"function": "get_dependency_hash", "args": ["requests", "2.0"]}"#);
    command
        .assert()
        .success()
        .stdout("744531b26c116624c8bbca91ac445d6d719f1e11d2ae852617ce7e7de052b162\n");
}

#[test]
fn unrecognised_function_exits_silently() {
    let mut command = cargo_bin_cmd!("pipwright");
    command.write_stdin(r#"{"function": "unknown_op", "args": []}"#);
    command.assert().success().stdout(is_empty());
}

#[test]
fn invalid_json_exits_with_failure() {
    let mut command = cargo_bin_cmd!("pipwright");
    command.write_stdin("not json");
    command
        .assert()
        .failure()
        .stdout(is_empty())
        .stderr(contains("malformed request"));
}
