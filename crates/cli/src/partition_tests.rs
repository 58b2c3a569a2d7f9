// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for suite partitioning.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;

use super::*;
use crate::test_utils::runtimes;

fn sizes(suites: &[Suite]) -> Vec<usize> {
    suites.iter().map(Suite::test_count).collect()
}

fn assigned_tests(suites: &[Suite]) -> Vec<String> {
    suites
        .iter()
        .flat_map(|suite| suite.tests().iter().cloned())
        .collect()
}

#[test]
fn empty_input_produces_no_suites() {
    assert!(partition_tests("core", &[], 600.0, None, None).is_empty());
}

#[test]
fn five_even_tests_split_two_two_one() {
    let input = runtimes(&[
        ("a.js", 40.0),
        ("b.js", 40.0),
        ("c.js", 40.0),
        ("d.js", 40.0),
        ("e.js", 40.0),
    ]);
    let suites = partition_tests("core", &input, 100.0, None, None);

    assert_eq!(sizes(&suites), [2, 2, 1]);
    assert_eq!(suites[0].tests(), ["a.js", "b.js"]);
    assert_eq!(suites[1].tests(), ["c.js", "d.js"]);
    assert_eq!(suites[2].tests(), ["e.js"]);
}

#[test]
fn single_oversized_test_occupies_its_own_suite() {
    let input = runtimes(&[("big.js", 500.0), ("small.js", 10.0)]);
    let suites = partition_tests("core", &input, 100.0, None, None);

    assert_eq!(sizes(&suites), [1, 1]);
    assert_eq!(suites[0].tests(), ["big.js"]);
}

#[test]
fn oversized_test_mid_stream_closes_the_running_suite() {
    let input = runtimes(&[("a.js", 30.0), ("big.js", 500.0), ("b.js", 30.0)]);
    let suites = partition_tests("core", &input, 100.0, None, None);

    assert_eq!(sizes(&suites), [1, 1, 1]);
    assert_eq!(suites[1].tests(), ["big.js"]);
}

#[test]
fn count_bound_closes_suites() {
    let input = runtimes(&[
        ("a.js", 1.0),
        ("b.js", 1.0),
        ("c.js", 1.0),
        ("d.js", 1.0),
        ("e.js", 1.0),
        ("f.js", 1.0),
        ("g.js", 1.0),
    ]);
    let suites = partition_tests("core", &input, 1000.0, None, Some(3));

    assert_eq!(sizes(&suites), [3, 3, 1]);
}

#[test]
fn zero_max_tests_per_suite_disables_count_bound() {
    let input = runtimes(&[("a.js", 1.0), ("b.js", 1.0), ("c.js", 1.0)]);
    let suites = partition_tests("core", &input, 1000.0, None, Some(0));

    assert_eq!(sizes(&suites), [3]);
}

#[test]
fn suite_cap_distributes_remainder_round_robin() {
    let input = runtimes(&[
        ("a.js", 40.0),
        ("b.js", 40.0),
        ("c.js", 40.0),
        ("d.js", 40.0),
        ("e.js", 40.0),
    ]);
    let suites = partition_tests("core", &input, 100.0, Some(2), None);

    // The bounds stop applying once the cap is hit: e.js lands in suite 0
    // even though that takes it past the target.
    assert_eq!(sizes(&suites), [3, 2]);
    assert_eq!(suites[0].tests(), ["a.js", "b.js", "e.js"]);
    assert_eq!(suites[1].tests(), ["c.js", "d.js"]);
}

#[test]
fn remainder_tests_keep_their_runtime_values() {
    let input = runtimes(&[
        ("a.js", 40.0),
        ("b.js", 40.0),
        ("c.js", 40.0),
        ("d.js", 40.0),
        ("e.js", 40.0),
    ]);
    let suites = partition_tests("core", &input, 100.0, Some(2), None);

    assert!((suites[0].total_runtime() - 120.0).abs() < f64::EPSILON);
    assert!((suites[1].total_runtime() - 80.0).abs() < f64::EPSILON);
}

#[test]
fn long_remainder_cycles_through_all_suites() {
    // Eight one-a-piece tests against a cap of 2: two suites form, then
    // the rest alternate 0, 1, 0, 1, ...
    let input = runtimes(&[
        ("a.js", 10.0),
        ("b.js", 10.0),
        ("c.js", 10.0),
        ("d.js", 10.0),
        ("e.js", 10.0),
        ("f.js", 10.0),
        ("g.js", 10.0),
        ("h.js", 10.0),
    ]);
    let suites = partition_tests("core", &input, 10.0, Some(2), None);

    assert_eq!(sizes(&suites), [4, 4]);
    assert_eq!(suites[0].tests(), ["a.js", "c.js", "e.js", "g.js"]);
    assert_eq!(suites[1].tests(), ["b.js", "d.js", "f.js", "h.js"]);
}

#[test]
fn duplicate_tests_are_partitioned_twice() {
    let input = runtimes(&[("a.js", 40.0), ("a.js", 40.0), ("a.js", 40.0)]);
    let suites = partition_tests("core", &input, 100.0, None, None);

    assert_eq!(assigned_tests(&suites).len(), 3);
}

#[test]
fn suites_are_indexed_in_creation_order() {
    let input = runtimes(&[("a.js", 90.0), ("b.js", 90.0), ("c.js", 90.0)]);
    let suites = partition_tests("core", &input, 100.0, None, None);

    let indexes: Vec<usize> = suites.iter().map(Suite::index).collect();
    assert_eq!(indexes, [0, 1, 2]);
}

#[test]
fn fallback_divides_round_robin() {
    let tests: Vec<String> = ["a.js", "b.js", "c.js", "d.js", "e.js"]
        .iter()
        .map(|t| (*t).to_string())
        .collect();
    let suites = fallback_partition("core", &tests, 3);

    assert_eq!(sizes(&suites), [2, 2, 1]);
    assert_eq!(suites[0].tests(), ["a.js", "d.js"]);
    assert_eq!(suites[1].tests(), ["b.js", "e.js"]);
    assert_eq!(suites[2].tests(), ["c.js"]);
}

#[test]
fn fallback_records_runtimes_as_unknown() {
    let tests = vec!["a.js".to_string(), "b.js".to_string()];
    let suites = fallback_partition("core", &tests, 2);

    assert!(suites.iter().all(|s| s.total_runtime() == 0.0));
    assert!(!suites[0].has_full_runtime_info());
}

#[test]
fn fallback_keeps_empty_suites_when_short_on_tests() {
    let tests = vec!["a.js".to_string()];
    let suites = fallback_partition("core", &tests, 4);

    assert_eq!(sizes(&suites), [1, 0, 0, 0]);
}

fn runtime_input(max_len: usize) -> impl Strategy<Value = Vec<TestRuntime>> {
    prop::collection::vec(0.0f64..120.0, 0..max_len).prop_map(|secs| {
        secs.into_iter()
            .enumerate()
            .map(|(idx, runtime)| TestRuntime::new(format!("tests/t{idx}.js"), runtime))
            .collect()
    })
}

proptest! {
    #[test]
    fn partitioning_never_drops_or_duplicates_tests(
        input in runtime_input(40),
        target in 1.0f64..300.0,
    ) {
        let suites = partition_tests("core", &input, target, None, None);

        let expected: Vec<String> =
            input.iter().map(|record| record.test_name.clone()).collect();
        prop_assert_eq!(assigned_tests(&suites), expected);
    }

    #[test]
    fn no_suite_is_ever_empty(
        input in runtime_input(40),
        target in 1.0f64..300.0,
    ) {
        let suites = partition_tests("core", &input, target, None, None);
        prop_assert!(suites.iter().all(|suite| suite.test_count() > 0));
    }

    #[test]
    fn runtime_bound_holds_without_a_suite_cap(
        input in runtime_input(40),
        target in 1.0f64..300.0,
    ) {
        let suites = partition_tests("core", &input, target, None, None);
        for suite in &suites {
            // The only allowed overshoot is a single test longer than
            // the target on its own.
            prop_assert!(suite.total_runtime() <= target || suite.test_count() == 1);
        }
    }

    #[test]
    fn suite_cap_is_exact_under_pressure(extra in 1usize..30) {
        // Every test alone busts the target, so the cap is always hit.
        let input: Vec<TestRuntime> = (0..3 + extra)
            .map(|idx| TestRuntime::new(format!("tests/t{idx}.js"), 40.0))
            .collect();
        let suites = partition_tests("core", &input, 10.0, Some(3), None);

        prop_assert_eq!(suites.len(), 3);
        prop_assert_eq!(assigned_tests(&suites).len(), input.len());
    }

    #[test]
    fn fallback_count_and_placement_are_exact(
        test_count in 0usize..40,
        suite_count in 1usize..10,
    ) {
        let tests: Vec<String> =
            (0..test_count).map(|idx| format!("tests/t{idx}.js")).collect();
        let suites = fallback_partition("core", &tests, suite_count);

        prop_assert_eq!(suites.len(), suite_count);
        for (idx, test) in tests.iter().enumerate() {
            let slot = idx % suite_count;
            prop_assert_eq!(&suites[slot].tests()[idx / suite_count], test);
        }
    }
}
