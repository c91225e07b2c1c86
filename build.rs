//! Build script stamping `dosie --version`.
//!
//! Sets at compile time:
//! - `DOSIE_BUILD_TIMESTAMP`: UTC build time, taken from `SOURCE_DATE_EPOCH`
//!   when set so packaged builds are reproducible
//! - `DOSIE_GIT_COMMIT`: short commit hash, from the environment when building
//!   from a source tarball, else from git, else "unknown"

use chrono::{DateTime, Utc};
use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-env-changed=DOSIE_GIT_COMMIT");

    let built = build_time().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=DOSIE_BUILD_TIMESTAMP={}", built);

    let commit = env::var("DOSIE_GIT_COMMIT")
        .ok()
        .filter(|c| !c.trim().is_empty())
        .or_else(git_commit)
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=DOSIE_GIT_COMMIT={}", commit.trim());
}

fn build_time() -> DateTime<Utc> {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}
