use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary database
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

    /// A Command running in the temp directory, so no stray `tasknest.toml`
    /// is picked up, with the database set through the environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasknest").expect("Failed to find tasknest binary");
        cmd.current_dir(self.temp_dir.path())
            .env("TASKNEST_DATABASE_PATH", &self.db_path)
            .env_remove("RUST_LOG")
            .env_remove("TASKNEST_DEFAULT_STATUS")
            .env_remove("TASKNEST_DEFAULT_SORT");
        cmd
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
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

    /// Stdout of a successful command
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.run_success(args).get_output().stdout.clone();
        String::from_utf8(output).expect("stdout is not UTF-8")
    }

    /// The current contents as parsed export JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout_of(&["export"])).expect("export is not valid JSON")
    }

    /// Full ID of the exported task with the given title
    pub fn task_id(&self, title: &str) -> String {
        self.export_json()["tasks"]
            .as_array()
            .expect("tasks array")
            .iter()
            .find(|t| t["title"] == title)
            .and_then(|t| t["id"].as_str())
            .unwrap_or_else(|| panic!("no task titled {title}"))
            .to_string()
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use super::*;

    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Days left"))
    }

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Created task")
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }

    /// True when `first` appears before `second`
    pub fn appears_before(haystack: &str, first: &str, second: &str) -> bool {
        match (haystack.find(first), haystack.find(second)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}
