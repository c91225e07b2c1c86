//! Integration tests for the per-module CRUD commands.
//!
//! Every invocation starts from the seeded state, so these tests only see
//! mutations made within one process.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_snippet_list_is_sorted_by_title() {
    let env = TestEnv::new();
    let value = env.json(&["snippet", "list"]);
    assert_eq!(value["count"], 5);
    let titles: Vec<String> = value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap().to_lowercase())
        .collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}

#[test]
fn test_snippet_add_reports_next_id() {
    let env = TestEnv::new();
    let value = env.json(&["snippet", "add", "Deep Clone", "-c", "structuredClone(x)"]);
    assert_eq!(value["type"], "snippet");
    assert_eq!(value["id"], 13);
    assert_eq!(value["title"], "Deep Clone");
}

#[test]
fn test_bug_show_human() {
    let env = TestEnv::new();
    env.dosie()
        .args(["-H", "bug", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Bug #2: Infinite loop in useEffect"))
        .stdout(predicate::str::contains("Severity: high"));
}

#[test]
fn test_show_missing_fails_with_json_error() {
    let env = TestEnv::new();
    let output = env.dosie().args(["bug", "show", "404"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let error: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"], "Not found: bug#404");
}

#[test]
fn test_remove_missing_is_a_silent_no_op() {
    let env = TestEnv::new();
    let value = env.json(&["decision", "rm", "77"]);
    assert_eq!(value["action"], "removed");
    assert_eq!(value["changed"], false);
}

#[test]
fn test_bug_list_filters() {
    let env = TestEnv::new();
    let value = env.json(&["bug", "list", "--severity", "high"]);
    assert_eq!(value["count"], 2);

    let value = env.json(&["bug", "list", "-q", "closure"]);
    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["id"], 3);
}

#[test]
fn test_git_list_safe_hides_dangerous() {
    let env = TestEnv::new();
    let all = env.json(&["git", "list"]);
    assert_eq!(all["count"], 5);
    let safe = env.json(&["command", "list", "--safe"]);
    assert_eq!(safe["count"], 3);
    assert!(
        safe["items"]
            .as_array()
            .unwrap()
            .iter()
            .all(|item| item["dangerous"] == false)
    );
}

#[test]
fn test_git_show_keeps_body_shape() {
    let env = TestEnv::new();
    let single = env.json(&["git", "show", "10"]);
    assert_eq!(single["command"], "git status");
    let workflow = env.json(&["git", "show", "1"]);
    assert_eq!(workflow["commands"].as_array().unwrap().len(), 3);
}

#[test]
fn test_template_alias_and_type_filter() {
    let env = TestEnv::new();
    let value = env.json(&["bootstrap", "list", "--type", "React"]);
    assert_eq!(value["count"], 2);
    let value = env.json(&["template", "list", "-t", "vue"]);
    assert_eq!(value["count"], 0);
}

#[test]
fn test_decision_list_by_status() {
    let env = TestEnv::new();
    let value = env.json(&["decision", "list", "--status", "resolved"]);
    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["decision"], "CSS Modules instead of Tailwind");
}

#[test]
fn test_invalid_severity_is_rejected() {
    let env = TestEnv::new();
    env.dosie()
        .args(["bug", "add", "Oops", "--severity", "critical"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid severity"));
}
