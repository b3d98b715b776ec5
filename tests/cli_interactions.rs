//! CLI option tests
//!
//! These run the real binary and cover argument handling and startup
//! failures; none of them leave a server running.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Command for the server binary, isolated from the caller's environment
fn create_test_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tcping-server").unwrap();
    cmd.current_dir(dir.path());
    for var in [
        "TCPING_BIND",
        "TCPING_PORT",
        "TCPING_ATTEMPTS",
        "TCPING_WORKERS",
        "TCPING_TIMEOUT_MS",
        "TCPING_TOKEN",
        "TCPING_ENABLE_COLOR",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn empty_dir() -> TempDir {
    TempDir::new().unwrap()
}

#[test]
fn test_help_lists_options() {
    let dir = empty_dir();
    create_test_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--attempts"))
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--timeout-ms"))
        .stdout(predicate::str::contains("--token"))
        .stdout(predicate::str::contains("threads"));
}

#[test]
fn test_version_flag() {
    let dir = empty_dir();
    create_test_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_zero_attempts_rejected() {
    let dir = empty_dir();
    create_test_cmd(&dir)
        .args(["--attempts", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid attempts number"));
}

#[test]
fn test_zero_workers_rejected() {
    let dir = empty_dir();
    create_test_cmd(&dir)
        .args(["--threads", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid worker count"));
}

#[test]
fn test_out_of_range_port_rejected() {
    let dir = empty_dir();
    create_test_cmd(&dir)
        .args(["--port", "70000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("between 0 and 65535"));
}

#[test]
fn test_non_numeric_value_rejected_by_parser() {
    let dir = empty_dir();
    create_test_cmd(&dir)
        .args(["--timeout-ms", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_bind_address_rejected() {
    let dir = empty_dir();
    create_test_cmd(&dir)
        .args(["--bind", "not-an-ip"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid listen address"));
}

#[test]
fn test_env_file_values_are_validated() {
    let dir = empty_dir();
    fs::write(dir.path().join(".env"), "TCPING_WORKERS=0\n").unwrap();

    create_test_cmd(&dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid worker count"));
}

#[test]
fn test_malformed_env_value_rejected() {
    let dir = empty_dir();
    create_test_cmd(&dir)
        .env("TCPING_ATTEMPTS", "lots")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("TCPING_ATTEMPTS"));
}

#[test]
fn test_cli_flag_beats_bad_env_file_value() {
    let dir = empty_dir();
    fs::write(dir.path().join(".env"), "TCPING_ATTEMPTS=0\n").unwrap();

    // Flag fixes attempts, but the port is still out of range
    create_test_cmd(&dir)
        .args(["--attempts", "3", "--port", "65536"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 65535"));
}

#[test]
fn test_debug_summary_printed_once_and_bind_failure_exit_code() {
    let dir = empty_dir();
    let held = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = held.local_addr().unwrap().port();

    let output = create_test_cmd(&dir)
        .args(["--bind", "127.0.0.1", "--port", &port.to_string(), "--debug", "--no-color"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Configuration Summary:").count(), 1, "{}", stdout);
    assert_eq!(stdout.matches("Listen: 127.0.0.1:").count(), 1, "{}", stdout);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Network error"));
    drop(held);
}
