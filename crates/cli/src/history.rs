// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Historical runtime records and the pre-partition filter.

use std::collections::HashSet;

use crate::manifest::TestUniverse;

/// A test paired with its average historical runtime in seconds.
///
/// A runtime of zero means the history holds no data for the test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRuntime {
    pub test_name: String,
    pub runtime_secs: f64,
}

impl TestRuntime {
    pub fn new(test_name: impl Into<String>, runtime_secs: f64) -> Self {
        Self {
            test_name: test_name.into(),
            runtime_secs,
        }
    }
}

/// Normalize a test identifier to the canonical forward-slash form.
///
/// Upstream history records may carry platform path separators; the
/// universe always speaks forward slashes.
pub fn normalize_test_name(name: &str) -> String {
    name.replace('\\', "/")
}

/// Filter runtime records down to tests that are still part of the suite.
///
/// A record survives when the test still exists as a retrievable resource
/// and its normalized name appears in the universe. When `allow_list` is
/// given, the result is then restricted to its members.
///
/// Input order is preserved and duplicates pass through: upstream sources
/// may repeat a test, and the repetition is intentional. An empty result
/// is the caller's signal to fall back to the fixed split, not an error.
pub fn filter_runtimes(
    records: &[TestRuntime],
    universe: &dyn TestUniverse,
    allow_list: Option<&HashSet<String>>,
) -> Vec<TestRuntime> {
    let known: HashSet<String> = universe
        .tests()
        .iter()
        .map(|test| normalize_test_name(test))
        .collect();

    let mut kept: Vec<TestRuntime> = records
        .iter()
        .map(|record| TestRuntime {
            test_name: normalize_test_name(&record.test_name),
            runtime_secs: record.runtime_secs,
        })
        .filter(|record| universe.exists(&record.test_name) && known.contains(&record.test_name))
        .collect();

    if let Some(allow) = allow_list {
        kept.retain(|record| allow.contains(&record.test_name));
    }

    kept
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
