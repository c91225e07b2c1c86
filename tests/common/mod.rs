//! Common test utilities for dosie integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch
//! the user's `~/.config/dosie/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with an isolated config directory.
///
/// The `dosie()` method returns a `Command` that sets `DOSIE_CONFIG_DIR`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub config_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the dosie binary with an isolated config directory.
    pub fn dosie(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dosie"));
        cmd.env("DOSIE_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("DOSIE_LOG");
        cmd
    }

    /// Path of the config file the binary reads and writes.
    pub fn config_path(&self) -> std::path::PathBuf {
        self.config_dir.path().join("config.kdl")
    }

    /// Run `args` and parse stdout as JSON.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.dosie().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "dosie {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
