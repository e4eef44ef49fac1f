//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "keepsake-cli", "--"])
        .args(args)
        .env("KEEPSAKE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_gate_status() {
    let (stdout, _, code) = run_cli(&["gate", "status"]);
    assert_eq!(code, 0, "gate status failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("gate status should print JSON");
    assert!(parsed["status"].is_string());
    assert!(parsed["attempts_left"].is_number());
}

#[test]
fn test_gate_reset() {
    let (stdout, _, code) = run_cli(&["gate", "reset"]);
    assert_eq!(code, 0, "gate reset failed");
    assert!(stdout.contains("gate_reset"));
}

#[test]
fn test_gallery_status() {
    let (stdout, _, code) = run_cli(&["gallery", "status"]);
    assert_eq!(code, 0, "gallery status failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("gallery status should print JSON");
    assert!(parsed["is_open"].is_boolean());
}

#[test]
fn test_gallery_list() {
    let (_, _, code) = run_cli(&["gallery", "list"]);
    assert_eq!(code, 0, "gallery list failed");
}

#[test]
fn test_together() {
    let (stdout, _, code) = run_cli(&["together"]);
    assert_eq!(code, 0, "together failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("together should print JSON");
    assert!(parsed["together"].is_string());
    assert!(parsed["next_milestone"]["target_days"].is_number());
}

#[test]
fn test_letter_instant() {
    let (_, _, code) = run_cli(&["letter", "--instant"]);
    assert_eq!(code, 0, "letter failed");
}

#[test]
fn test_music_status() {
    let (stdout, _, code) = run_cli(&["music", "status"]);
    assert_eq!(code, 0, "music status failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("music status should print JSON");
    assert!(parsed["volume"].is_number());
}

#[test]
fn test_music_consent_rejects_garbage() {
    let (_, stderr, code) = run_cli(&["music", "consent", "maybe"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_timeline() {
    let (_, _, code) = run_cli(&["timeline"]);
    assert_eq!(code, 0, "timeline failed");
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "gallery.deep_link"]);
    assert_eq!(code, 0, "config get failed");
    assert!(stdout.contains("true") || stdout.contains("false"));
}

#[test]
fn test_config_get_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.contains("config.toml"));
}
