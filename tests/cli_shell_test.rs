//! Integration tests for `dosie shell`.
//!
//! Piped stdin is not a terminal, so no prompt is printed.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_shell_keeps_state_across_lines() {
    let env = TestEnv::new();
    env.dosie()
        .args(["-H", "shell"])
        .write_stdin(
            "bug add \"Stale closure\" --severity low\n\
             link add bug 7 snippet 3\n\
             snippet update 3 --title \"Find in List\"\n\
             doctor\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Added bug#7: Stale closure"))
        .stdout(predicate::str::contains("linked: bug#7 -> snippet#3"))
        .stdout(predicate::str::contains(
            "bug#7 -> snippet#3 \"Find Something in List\" is now \"Find in List\"",
        ));
}

#[test]
fn test_no_subcommand_starts_shell() {
    let env = TestEnv::new();
    env.dosie()
        .write_stdin("items -t decision\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""count":3"#));
}

#[test]
fn test_shell_reports_errors_and_continues() {
    let env = TestEnv::new();
    env.dosie()
        .arg("shell")
        .write_stdin("git show 404\nbrowse bug 2 -c nowhere\ngit show 10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"error":"Not found: git#404"}"#))
        .stdout(predicate::str::contains("Unknown category"))
        .stdout(predicate::str::contains(r#""command":"git status""#));
}

#[test]
fn test_shell_exit() {
    let env = TestEnv::new();
    env.dosie()
        .args(["-H", "shell"])
        .write_stdin("quit\nitems\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_shell_theme_persists() {
    let env = TestEnv::new();
    env.dosie()
        .args(["-H", "shell"])
        .write_stdin("theme --dark\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));
    assert!(env.config_path().exists());
}
