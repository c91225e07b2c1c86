//! Integration tests for theme and config commands.
//!
//! Precedence: -H flag > config.kdl > defaults.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_theme_defaults_to_light_without_writing() {
    let env = TestEnv::new();
    let value = env.json(&["theme"]);
    assert_eq!(value["theme"], "light");
    assert_eq!(value["changed"], false);
    assert!(!env.config_path().exists());
}

#[test]
fn test_theme_toggle_round_trip() {
    let env = TestEnv::new();
    let value = env.json(&["theme", "--toggle"]);
    assert_eq!(value["dark_mode"], true);
    let text = fs::read_to_string(env.config_path()).unwrap();
    assert!(text.contains("dark-mode #true"));

    let value = env.json(&["theme", "--toggle"]);
    assert_eq!(value["dark_mode"], false);
}

#[test]
fn test_config_output_format_switches_default() {
    let env = TestEnv::new();
    env.dosie()
        .args(["config", "set", "output-format", "human"])
        .assert()
        .success();

    env.dosie()
        .args(["bug", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Bug #1: List renders twice"));
}

#[test]
fn test_config_get_reports_source() {
    let env = TestEnv::new();
    let value = env.json(&["config", "get", "dark-mode"]);
    assert_eq!(value["value"], "false");
    assert_eq!(value["source"], "default");

    fs::write(env.config_path(), "dark-mode #true\n").unwrap();
    let value = env.json(&["config", "get", "dark-mode"]);
    assert_eq!(value["value"], "true");
    assert_eq!(value["source"], "config-file");
}

#[test]
fn test_config_list_human() {
    let env = TestEnv::new();
    env.dosie()
        .args(["-H", "config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output-format = json (default)"))
        .stdout(predicate::str::contains("dark-mode = false (default)"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let env = TestEnv::new();
    env.dosie()
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_quoted_error_message_is_valid_json() {
    let env = TestEnv::new();
    let output = env
        .dosie()
        .args(["config", "set", "output-format", "yaml"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let error: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(
        error["error"],
        r#"Invalid input: output-format must be "json" or "human", got yaml"#
    );
}

#[test]
fn test_corrupt_config_does_not_block_session_commands() {
    let env = TestEnv::new();
    fs::write(env.config_path(), "dark-mode {").unwrap();
    env.dosie()
        .args(["snippet", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""count":5"#))
        .stderr(predicate::str::contains("Ignoring config"));

    env.dosie()
        .arg("shell")
        .write_stdin("items -t bug\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""count":4"#));
}

#[test]
fn test_corrupt_config_is_named_and_repairable() {
    let env = TestEnv::new();
    fs::write(env.config_path(), "dark-mode {").unwrap();
    env.dosie()
        .args(["config", "get", "dark-mode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"))
        .stderr(predicate::str::contains("config.kdl"));

    env.dosie()
        .args(["config", "set", "dark-mode", "false"])
        .assert()
        .success();
    let value = env.json(&["config", "get", "dark-mode"]);
    assert_eq!(value["value"], "false");
    assert_eq!(value["source"], "config-file");
}

#[test]
fn test_theme_toggle_replaces_corrupt_config() {
    let env = TestEnv::new();
    fs::write(env.config_path(), "output-format \"human").unwrap();
    let value = env.json(&["theme", "--toggle"]);
    assert_eq!(value["dark_mode"], true);
    let text = fs::read_to_string(env.config_path()).unwrap();
    assert!(text.contains("dark-mode #true"));
}

#[test]
fn test_config_dir_flag_overrides_env() {
    let env = TestEnv::new();
    let other = common::TempDir::new().unwrap();
    env.dosie()
        .args(["--config-dir"])
        .arg(other.path())
        .args(["theme", "--dark"])
        .assert()
        .success();
    assert!(other.path().join("config.kdl").exists());
    assert!(!env.config_path().exists());
}
