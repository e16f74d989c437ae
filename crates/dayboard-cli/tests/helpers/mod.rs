use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("dayboard").expect("Failed to find dayboard binary");

        // Run inside the temp dir so no stray dayboard.toml is picked up
        cmd.current_dir(self.temp_dir.path());
        cmd.env("DAYBOARD_DATABASE_PATH", &self.db_path);
        cmd.env_remove("RUST_LOG");

        cmd
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Run a successful command and return its stdout
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.run_success(args).get_output().stdout.clone();
        String::from_utf8(output).expect("stdout is not UTF-8")
    }

    /// Create a column and return its UUID
    pub fn add_column(&self, name: &str) -> String {
        let out = self.stdout_of(&["column", "add", name]);
        let start = out.rfind('(').expect("no uuid in output") + 1;
        let end = out.rfind(')').expect("no uuid in output");
        out[start..end].to_string()
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use super::*;

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("✓").and(predicate::str::contains("Created"))
    }

    pub fn error_code(code: &'static str) -> impl Predicate<str> {
        predicate::str::contains("Error").and(predicate::str::contains(format!("[{}]", code)))
    }
}
