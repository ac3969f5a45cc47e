//! CLI replay integration tests
//!
//! These tests run the built binary against scripts written to a temporary
//! directory and check what it prints.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_script(temp_dir: &TempDir, body: &str) -> PathBuf {
    let path = temp_dir.path().join("session.gdl");
    fs::write(&path, body).unwrap();
    path
}

fn run_cli(args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_gdlog-cli");
    Command::new(cli_bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_replay_text_output() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(
        &temp_dir,
        "# load one cave\n\
         warning x\n\
         logger\n\
         context Reading file\n\
         critical y\n\
         end\n\
         warning z\n",
    );

    let output = run_cli(&["replay", script.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Root is the first logger the process creates, the nested one the second.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "logger #2:\ncritical: Reading file: y\nlogger #1:\nwarning: x\nwarning: z\n"
    );

    // Everything was inspected, so no logger dumped unread messages.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("unread message"), "stderr: {}", stderr);
}

#[test]
fn test_cli_replay_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(&temp_dir, "context Saving\nerror disk full\n");

    let output = run_cli(&["replay", script.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "loggers": [
                {
                    "id": 1,
                    "messages": [{"severity": "error", "text": "Saving: disk full"}]
                }
            ]
        })
    );
}

#[test]
fn test_cli_replay_min_severity_filters_display() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(&temp_dir, "debug noise\nmessage note\ncritical boom\n");

    let output = run_cli(&[
        "replay",
        script.to_str().unwrap(),
        "--min-severity",
        "warning",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "logger #1:\ncritical: boom\n");
}

#[test]
fn test_cli_replay_ignore_root() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(&temp_dir, "warning dropped\n");

    let output = run_cli(&["replay", script.to_str().unwrap(), "--ignore-root"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "logger #1:\n");
}

#[test]
fn test_cli_replay_reports_script_errors() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(&temp_dir, "warning fine\nshout loudly\n");

    let output = run_cli(&["replay", script.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: line 2: unknown directive 'shout'"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_cli_replay_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.gdl");

    let output = run_cli(&["replay", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read"));
}

#[test]
fn test_cli_replay_structural_error_dumps_unread_messages() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(&temp_dir, "warning pending\nleave\n");

    let output = run_cli(&["replay", script.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("logger #1 dropped with 1 unread message(s):"));
    assert!(stderr.contains("  warning: pending"));
    assert!(stderr.contains("Error: line 2: 'leave' with no open context"));
}

#[test]
fn test_cli_replay_error_still_prints_closed_loggers() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(&temp_dir, "logger\nwarning y\nend\nleave\n");

    let output = run_cli(&["replay", script.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "logger #2:\nwarning: y\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: line 4: 'leave' with no open context"));
}

#[test]
fn test_cli_severities_lists_ascending() {
    let output = run_cli(&["severities"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "debug\ninfo\nmessage\nwarning\ncritical\nerror\n"
    );
}
