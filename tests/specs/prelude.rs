//! Test helpers for behavioral specifications.
//!
//! Provides a small project builder for testing suitesplit CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the suitesplit binary
pub fn suitesplit_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("suitesplit"))
}

const BASE_EXPANSIONS: &str = "\
project: server-main
build_variant: linux-64
task_name: auth_gen
task_id: task_1234
";

/// A temporary project the CLI runs against: a suite definition for the
/// `auth` suite, its test files, and optionally a stats export.
pub struct Project {
    dir: TempDir,
    tests: Vec<String>,
}

impl Project {
    /// Project with an empty `auth` suite definition.
    pub fn new() -> Self {
        let project = Self::bare();
        project.write("suites/auth.yml", "selector:\n  roots: []\n");
        project
    }

    /// Project without any suite definition.
    pub fn bare() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            tests: Vec::new(),
        }
    }

    /// Create test files and list them as the suite's roots.
    pub fn with_tests(mut self, tests: &[&str]) -> Self {
        for test in tests {
            self.write(test, "");
            self.tests.push((*test).to_string());
        }
        let roots = self
            .tests
            .iter()
            .map(|t| format!("    - {t}"))
            .collect::<Vec<_>>()
            .join("\n");
        self.write("suites/auth.yml", &format!("selector:\n  roots:\n{roots}\n"));
        self
    }

    /// Write a stats export with the given (test, average runtime) records.
    pub fn with_stats(self, stats: &[(&str, f64)]) -> Self {
        let records = stats
            .iter()
            .map(|(name, secs)| {
                format!("{{\"test_name\": \"{name}\", \"avg_duration_secs\": {secs}}}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        self.with_raw_stats(&format!("[{records}]"))
    }

    /// Write the stats export verbatim.
    pub fn with_raw_stats(self, contents: &str) -> Self {
        self.write("test_stats.json", contents);
        self
    }

    /// Append run-specific keys to the standard expansions document.
    pub fn with_expansions(self, extra: &str) -> Self {
        self.with_expansions_document(&format!("{BASE_EXPANSIONS}{extra}"))
    }

    /// Use the given expansions document verbatim.
    pub fn with_expansions_document(self, contents: &str) -> Self {
        self.write("expansions.yml", contents);
        self
    }

    /// The generate command, ready to run against this project.
    pub fn generate(&self) -> Command {
        let mut cmd = suitesplit_cmd();
        cmd.current_dir(self.dir.path())
            .args(["generate", "--expansions", "expansions.yml"]);
        cmd
    }

    pub fn read_yaml(&self, path: &str) -> serde_yaml::Value {
        serde_yaml::from_str(&self.read(path)).unwrap()
    }

    pub fn read_json(&self, path: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(path)).unwrap()
    }

    fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    fn write(&self, path: &str, contents: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, contents).unwrap();
    }
}
