// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timeout derivation from historical runtimes.

use serde::Serialize;

/// Floor for any derived timeout (5 minutes).
const MIN_TIMEOUT_SECS: u64 = 300;

/// Flat allowance for suite setup, added on top of the scaled runtime.
const SETUP_OVERHEAD_SECS: u64 = 300;

/// Ceiling a patch build may never exceed (48 hours).
const MAX_EXPECTED_TIMEOUT_SECS: u64 = 172_800;

/// Default multiplier applied to the rounded runtime.
pub const DEFAULT_SCALING_FACTOR: u64 = 3;

/// Whether a generated task overrides the CI system's default timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeoutDecision {
    /// Keep the CI defaults.
    Default,
    /// Override with derived ceilings.
    Override(TimeoutOverride),
}

/// Derived timeout ceilings for one generated task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeoutOverride {
    /// Per-test ceiling, derived from the longest test runtime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec_timeout_secs: Option<u64>,

    /// Whole-suite ceiling, derived from the summed suite runtime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_timeout_secs: Option<u64>,
}

/// A patch build derived a timeout beyond the absolute ceiling.
///
/// Raised instead of clamping: a timeout this large almost always means a
/// misconfigured repeat factor, and clamping would let it into CI
/// silently.
#[derive(Debug, thiserror::Error)]
#[error(
    "derived timeouts (exec {exec_timeout_secs:?}s, overall {overall_timeout_secs:?}s) exceed \
     the {ceiling_secs}s ceiling for patch builds; check the repeat factor ({repeat_factor})"
)]
pub struct TimeoutBudgetError {
    pub exec_timeout_secs: Option<u64>,
    pub overall_timeout_secs: Option<u64>,
    pub repeat_factor: u64,
    pub ceiling_secs: u64,
}

/// Derive the timeout decision for one suite.
///
/// A zero runtime means no data. When the caller asked for defaults, or
/// both runtime inputs are absent or zero, the CI defaults stand.
pub fn estimate(
    max_test_runtime: Option<f64>,
    expected_suite_runtime: Option<f64>,
    use_default: bool,
    repeat_factor: u64,
    scaling_factor: u64,
    is_patch_build: bool,
) -> Result<TimeoutDecision, TimeoutBudgetError> {
    let max_test_runtime = max_test_runtime.filter(|&r| r > 0.0);
    let expected_suite_runtime = expected_suite_runtime.filter(|&r| r > 0.0);

    if use_default || (max_test_runtime.is_none() && expected_suite_runtime.is_none()) {
        return Ok(TimeoutDecision::Default);
    }

    let exec_timeout_secs = max_test_runtime.map(|runtime| {
        let timeout = calculate_timeout(runtime, scaling_factor, repeat_factor);
        tracing::debug!(
            "exec timeout {}s from max test runtime {:.1}s (repeat factor {})",
            timeout,
            runtime,
            repeat_factor
        );
        timeout
    });
    let overall_timeout_secs = expected_suite_runtime.map(|runtime| {
        let timeout = calculate_timeout(runtime, scaling_factor, repeat_factor);
        tracing::debug!(
            "overall timeout {}s from expected suite runtime {:.1}s (repeat factor {})",
            timeout,
            runtime,
            repeat_factor
        );
        timeout
    });

    let over_ceiling =
        |timeout: Option<u64>| timeout.is_some_and(|secs| secs > MAX_EXPECTED_TIMEOUT_SECS);
    if is_patch_build && (over_ceiling(exec_timeout_secs) || over_ceiling(overall_timeout_secs)) {
        tracing::error!(
            "this task is expected to run far longer than normal, likely from a very high \
             repeat factor ({}); derived exec {:?}s / overall {:?}s against ceiling {}s",
            repeat_factor,
            exec_timeout_secs,
            overall_timeout_secs,
            MAX_EXPECTED_TIMEOUT_SECS
        );
        return Err(TimeoutBudgetError {
            exec_timeout_secs,
            overall_timeout_secs,
            repeat_factor,
            ceiling_secs: MAX_EXPECTED_TIMEOUT_SECS,
        });
    }

    Ok(TimeoutDecision::Override(TimeoutOverride {
        exec_timeout_secs,
        overall_timeout_secs,
    }))
}

/// Scale a runtime into a timeout.
fn calculate_timeout(runtime_secs: f64, scaling_factor: u64, repeat_factor: u64) -> u64 {
    MIN_TIMEOUT_SECS.max(round_to_next_minute(runtime_secs)) * scaling_factor * repeat_factor
        + SETUP_OVERHEAD_SECS
}

/// Round up to the next full minute.
///
/// A value already on a minute boundary still advances to the following
/// one: round_to_next_minute(60) == 120. Historical behavior, preserved
/// as-is and pinned by tests.
fn round_to_next_minute(runtime_secs: f64) -> u64 {
    let distance = 60.0 - runtime_secs % 60.0;
    (runtime_secs + distance).ceil() as u64
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
