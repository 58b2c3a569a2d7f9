// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The expansions file: the external configuration surface.
//!
//! The CI system materializes one YAML expansions document per generating
//! task. Everything is validated here, at the boundary; the core never
//! re-checks configuration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::taskname;
use crate::timeout;

const DEFAULT_MAX_SUITES: usize = 10;
const DEFAULT_MAX_TESTS_PER_SUITE: usize = 100;
const DEFAULT_FALLBACK_SUITE_COUNT: usize = 5;
const DEFAULT_LOOKBACK_DAYS: i64 = 14;
const DEFAULT_SUITES_DIR: &str = "suites";
const DEFAULT_OUTPUT_DIR: &str = "generated_tasks";

/// Raw per-task expansions as the CI system writes them.
///
/// Keys without a value in the document take the documented default;
/// missing required keys fail deserialization with the key named.
#[derive(Debug, Deserialize)]
pub struct Expansions {
    pub project: String,
    pub build_variant: String,
    pub task_name: String,
    pub task_id: String,

    /// Target runtime per generated suite, in minutes.
    pub target_runtime_mins: u64,

    /// Suite to split; defaults to the task name minus its `_gen` suffix.
    #[serde(default)]
    pub suite: Option<String>,

    /// Hard cap on generated suites; 0 disables the cap.
    #[serde(default = "default_max_suites")]
    pub max_suites: usize,

    /// Soft cap on tests per suite; 0 disables the cap.
    #[serde(default = "default_max_tests_per_suite")]
    pub max_tests_per_suite: usize,

    /// Suite count for the no-history fallback split.
    #[serde(default = "default_fallback_suite_count")]
    pub fallback_suite_count: usize,

    /// How many times each generated suite is executed.
    #[serde(default = "default_repeat_factor")]
    pub repeat_factor: u64,

    #[serde(default)]
    pub use_default_timeouts: bool,

    #[serde(default)]
    pub is_patch: bool,

    #[serde(default = "default_timeout_scaling_factor")]
    pub timeout_scaling_factor: u64,

    /// History window length, in days.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    #[serde(default = "default_suites_dir")]
    pub suites_dir: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Extra arguments passed through to the test runner.
    #[serde(default)]
    pub runner_args: String,

    #[serde(default)]
    pub build_id: String,

    /// Comma-separated base names of tasks the generated tasks depend on.
    #[serde(default)]
    pub depends_on: Option<String>,

    /// Comma-separated display names of the tasks already in the build.
    #[serde(default)]
    pub build_tasks: Option<String>,

    /// Comma-separated allow-list of tests to keep after filtering.
    #[serde(default)]
    pub selected_tests: Option<String>,
}

fn default_max_suites() -> usize {
    DEFAULT_MAX_SUITES
}

fn default_max_tests_per_suite() -> usize {
    DEFAULT_MAX_TESTS_PER_SUITE
}

fn default_fallback_suite_count() -> usize {
    DEFAULT_FALLBACK_SUITE_COUNT
}

fn default_repeat_factor() -> u64 {
    1
}

fn default_timeout_scaling_factor() -> u64 {
    timeout::DEFAULT_SCALING_FACTOR
}

fn default_lookback_days() -> i64 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_suites_dir() -> String {
    DEFAULT_SUITES_DIR.to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

/// Validated configuration for one generate run.
#[derive(Debug)]
pub struct GenerateConfig {
    pub project: String,
    pub build_variant: String,
    /// Name of the generating task, as configured (`..._gen`).
    pub task_name: String,
    /// Base task name, with the `_gen` suffix stripped.
    pub task: String,
    pub task_id: String,
    pub suite: String,
    pub target_runtime_secs: f64,
    pub max_suites: Option<usize>,
    pub max_tests_per_suite: Option<usize>,
    pub fallback_suite_count: usize,
    pub repeat_factor: u64,
    pub use_default_timeouts: bool,
    pub is_patch: bool,
    pub timeout_scaling_factor: u64,
    pub lookback_days: i64,
    pub suites_dir: PathBuf,
    pub output_dir: PathBuf,
    pub runner_args: String,
    pub build_id: String,
    pub depends_on: Vec<String>,
    pub build_tasks: Vec<String>,
    pub selected_tests: Option<HashSet<String>>,
}

impl GenerateConfig {
    /// Load and validate an expansions file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read expansions file {}", path.display()))?;
        let raw: Expansions = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid expansions file {}", path.display()))?;
        Self::from_expansions(raw)
    }

    /// Validate raw expansions into a usable configuration.
    pub fn from_expansions(raw: Expansions) -> anyhow::Result<Self> {
        if raw.target_runtime_mins == 0 {
            anyhow::bail!("target_runtime_mins must be at least 1");
        }
        if raw.repeat_factor == 0 {
            anyhow::bail!("repeat_factor must be at least 1");
        }
        if raw.fallback_suite_count == 0 {
            anyhow::bail!("fallback_suite_count must be at least 1");
        }
        if raw.timeout_scaling_factor == 0 {
            anyhow::bail!("timeout_scaling_factor must be at least 1");
        }

        let task = taskname::remove_gen_suffix(&raw.task_name).to_string();
        let suite = raw.suite.unwrap_or_else(|| task.clone());

        Ok(Self {
            project: raw.project,
            build_variant: raw.build_variant,
            task_name: raw.task_name,
            task,
            task_id: raw.task_id,
            suite,
            target_runtime_secs: (raw.target_runtime_mins * 60) as f64,
            max_suites: nonzero(raw.max_suites),
            max_tests_per_suite: nonzero(raw.max_tests_per_suite),
            fallback_suite_count: raw.fallback_suite_count,
            repeat_factor: raw.repeat_factor,
            use_default_timeouts: raw.use_default_timeouts,
            is_patch: raw.is_patch,
            timeout_scaling_factor: raw.timeout_scaling_factor,
            lookback_days: raw.lookback_days,
            suites_dir: PathBuf::from(raw.suites_dir),
            output_dir: PathBuf::from(raw.output_dir),
            runner_args: raw.runner_args,
            build_id: raw.build_id,
            depends_on: split_list(raw.depends_on.as_deref()),
            build_tasks: split_list(raw.build_tasks.as_deref()),
            selected_tests: raw
                .selected_tests
                .as_deref()
                .map(|value| split_list(Some(value)).into_iter().collect()),
        })
    }
}

fn nonzero(value: usize) -> Option<usize> {
    (value > 0).then_some(value)
}

/// Split a comma-separated expansion value; absent or blank means empty.
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
