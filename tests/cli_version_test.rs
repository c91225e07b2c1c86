//! `dosie --version` carries the build stamp.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_long_version_includes_commit_and_build_time() {
    let env = TestEnv::new();
    env.dosie()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("commit: "))
        .stdout(
            predicate::str::is_match(r"built: \d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z").unwrap(),
        );
}
