// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Greedy suite partitioning and the fixed-count fallback split.
//!
//! The partitioner is a deterministic single forward pass: tests are
//! appended to the current suite until adding one more would break a
//! bound, at which point the suite is closed and a new one opened. Once
//! the suite cap is reached, every remaining test is spread round-robin
//! over the suites already produced, bounds ignored. Downstream task
//! naming and dependency wiring assume this exact assignment order, so
//! the policy stays as-is rather than gaining bin-packing smarts.

use crate::history::TestRuntime;
use crate::suite::{Suite, SuiteCounter};

/// Divide `tests_runtimes` into suites bounded by `target_runtime_secs`.
///
/// A suite with no tests always accepts the next test, so a single test
/// longer than the target occupies a suite of its own. When `max_suites`
/// is reached before all tests are assigned, the remainder is divided
/// among the produced suites regardless of the runtime and count bounds:
/// past the cap, balance is traded for completeness. A
/// `max_tests_per_suite` of zero disables the count bound.
pub fn partition_tests(
    source_name: &str,
    tests_runtimes: &[TestRuntime],
    target_runtime_secs: f64,
    max_suites: Option<usize>,
    max_tests_per_suite: Option<usize>,
) -> Vec<Suite> {
    let mut counter = SuiteCounter::new();
    let mut suites: Vec<Suite> = Vec::new();
    let mut current = counter.new_suite(source_name);
    let mut remainder_start = tests_runtimes.len();

    tracing::debug!(
        "partitioning {} tests: target_runtime_secs={} max_suites={:?} max_tests_per_suite={:?}",
        tests_runtimes.len(),
        target_runtime_secs,
        max_suites,
        max_tests_per_suite
    );

    for (idx, record) in tests_runtimes.iter().enumerate() {
        if current.test_count() > 0
            && new_suite_needed(
                &current,
                record.runtime_secs,
                target_runtime_secs,
                max_tests_per_suite,
            )
        {
            tracing::debug!(
                "closing suite {} at {:.1}s before {}",
                current.index(),
                current.total_runtime(),
                record.test_name
            );
            let closed = std::mem::replace(&mut current, counter.new_suite(source_name));
            suites.push(closed);

            if let Some(max) = max_suites
                && suites.len() >= max
            {
                remainder_start = idx;
                break;
            }
        }

        current.add_test(&record.test_name, record.runtime_secs);
    }

    if current.test_count() > 0 {
        suites.push(current);
    }

    if remainder_start < tests_runtimes.len() {
        tracing::debug!(
            "suite cap reached, dividing {} remaining tests among {} suites",
            tests_runtimes.len() - remainder_start,
            suites.len()
        );
        divide_remaining(&tests_runtimes[remainder_start..], &mut suites);
    }

    suites
}

/// Whether adding a test of `runtime_secs` to `current` would break a bound.
fn new_suite_needed(
    current: &Suite,
    runtime_secs: f64,
    target_runtime_secs: f64,
    max_tests_per_suite: Option<usize>,
) -> bool {
    if current.total_runtime() + runtime_secs > target_runtime_secs {
        return true;
    }

    if let Some(max) = max_tests_per_suite
        && max > 0
        && current.test_count() + 1 > max
    {
        return true;
    }

    false
}

/// Spread leftover tests over the produced suites, cycling from suite 0.
///
/// Runtime values are carried through unchanged; the bounds no longer
/// apply here.
fn divide_remaining(remaining: &[TestRuntime], suites: &mut [Suite]) {
    for (offset, record) in remaining.iter().enumerate() {
        suites[offset % suites.len()].add_test(&record.test_name, record.runtime_secs);
    }
}

/// Divide `test_names` into exactly `suite_count` suites round-robin.
///
/// Used when no usable runtime history exists; every test is recorded
/// with an unknown (zero) runtime. Suites may come out empty when there
/// are fewer tests than suites, which is acceptable. `suite_count` must
/// be at least one; the configuration boundary validates this.
pub fn fallback_partition(
    source_name: &str,
    test_names: &[String],
    suite_count: usize,
) -> Vec<Suite> {
    let mut counter = SuiteCounter::new();
    let mut suites: Vec<Suite> = (0..suite_count)
        .map(|_| counter.new_suite(source_name))
        .collect();

    for (idx, test_name) in test_names.iter().enumerate() {
        suites[idx % suite_count].add_test(test_name, 0.0);
    }

    suites
}

#[cfg(test)]
#[path = "partition_tests.rs"]
mod tests;
