//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::history::TestRuntime;
use crate::manifest::TestUniverse;

/// A test universe whose contents and existence answers are fixed up
/// front, for exercising the filter without touching the filesystem.
pub struct FakeUniverse {
    tests: Vec<String>,
    missing: HashSet<String>,
}

impl FakeUniverse {
    /// Universe where every listed test also exists on disk.
    pub fn new(tests: &[&str]) -> Self {
        Self {
            tests: tests.iter().map(|t| (*t).to_string()).collect(),
            missing: HashSet::new(),
        }
    }

    /// Mark a test as no longer retrievable.
    pub fn without_file(mut self, test: &str) -> Self {
        self.missing.insert(test.to_string());
        self
    }
}

impl TestUniverse for FakeUniverse {
    fn tests(&self) -> Vec<String> {
        self.tests.clone()
    }

    fn exists(&self, test_name: &str) -> bool {
        !self.missing.contains(test_name)
    }
}

/// Shorthand for building runtime records.
pub fn runtimes(records: &[(&str, f64)]) -> Vec<TestRuntime> {
    records
        .iter()
        .map(|(name, secs)| TestRuntime::new(*name, *secs))
        .collect()
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}
