// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Task assembly: finalized suites into schedulable CI units.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use serde::Serialize;

use crate::config::GenerateConfig;
use crate::suite::Suite;
use crate::taskname;
use crate::timeout::{self, TimeoutBudgetError, TimeoutDecision, TimeoutOverride};

/// A schedulable unit handed to the CI system.
#[derive(Debug, Serialize)]
pub struct GeneratedTask {
    pub name: String,

    /// Display names of the tasks this one depends on.
    pub depends_on: Vec<String>,

    /// Execution variables for the task's run-tests step.
    pub vars: BTreeMap<String, String>,

    /// Timeout overrides; absent when the CI defaults stand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutOverride>,
}

/// Builds the generated-task set for a partitioned run.
pub struct TaskAssembler<'a> {
    config: &'a GenerateConfig,
}

impl<'a> TaskAssembler<'a> {
    pub fn new(config: &'a GenerateConfig) -> Self {
        Self { config }
    }

    /// Assemble one task per suite, plus the misc task that picks up
    /// tests absent from runtime history.
    pub fn assemble(&self, suites: &[Suite]) -> Result<Vec<GeneratedTask>, TimeoutBudgetError> {
        let mut tasks = Vec::with_capacity(suites.len() + 1);
        for (idx, suite) in suites.iter().enumerate() {
            tasks.push(self.suite_task(idx, suite, suites.len())?);
        }
        tasks.push(self.misc_task());
        Ok(tasks)
    }

    fn suite_task(
        &self,
        idx: usize,
        suite: &Suite,
        total: usize,
    ) -> Result<GeneratedTask, TimeoutBudgetError> {
        let name = taskname::name_generated_task(
            &self.config.task,
            idx,
            total,
            Some(&self.config.build_variant),
        );
        tracing::debug!("assembling task {}", name);

        // Runtimes feed the estimator only when history covered every
        // test in the suite; a partially-known suite keeps CI defaults.
        let (max_runtime, expected_runtime) = if suite.has_full_runtime_info() {
            (Some(suite.max_runtime()), Some(suite.total_runtime()))
        } else {
            (None, None)
        };
        let decision = timeout::estimate(
            max_runtime,
            expected_runtime,
            self.config.use_default_timeouts,
            self.config.repeat_factor,
            self.config.timeout_scaling_factor,
            self.config.is_patch,
        )?;

        Ok(self.task(name, &suite.display_name(total), decision))
    }

    fn misc_task(&self) -> GeneratedTask {
        let name = format!("{}_misc_{}", self.config.task, self.config.build_variant);
        let suite_file = format!("{}_misc", self.config.suite);
        self.task(name, &suite_file, TimeoutDecision::Default)
    }

    fn task(&self, name: String, suite_file: &str, decision: TimeoutDecision) -> GeneratedTask {
        GeneratedTask {
            name,
            depends_on: self.dependencies(),
            vars: self.run_vars(suite_file),
            timeout: match decision {
                TimeoutDecision::Default => None,
                TimeoutDecision::Override(over) => Some(over),
            },
        }
    }

    fn run_vars(&self, suite_file: &str) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert(
            "runner_args".to_string(),
            self.runner_invocation(suite_file),
        );
        vars.insert("task".to_string(), self.config.task.clone());
        vars.insert(
            "build_variant".to_string(),
            self.config.build_variant.clone(),
        );
        vars.insert("build_id".to_string(), self.config.build_id.clone());
        vars
    }

    fn runner_invocation(&self, suite_file: &str) -> String {
        // CI executes these under a POSIX shell everywhere, so the suite
        // path joins with forward slashes regardless of host platform.
        let mut args = format!(
            "--suite={}/{}.yml --origin-suite={}",
            self.config.output_dir.display(),
            suite_file,
            self.config.suite
        );
        if !self.config.runner_args.is_empty() {
            args.push(' ');
            args.push_str(&self.config.runner_args);
        }
        if !args.contains("--repeat") {
            args.push_str(&format!(" --repeat={}", self.config.repeat_factor));
        }
        args
    }

    /// The dependency set: `compile` always, plus the expansion of each
    /// configured base-task dependency against the build's task names.
    /// Patch builds skip the expansion; dependency wiring only matters on
    /// mainline.
    fn dependencies(&self) -> Vec<String> {
        let mut deps = BTreeSet::new();
        deps.insert("compile".to_string());

        if !self.config.is_patch {
            for dependency in &self.config.depends_on {
                for name in self.tasks_matching(dependency) {
                    deps.insert(name);
                }
            }
        }

        deps.into_iter().collect()
    }

    /// Build tasks generated from `dependency`: `{dependency}_<n>` or
    /// `{dependency}_misc`.
    fn tasks_matching(&self, dependency: &str) -> Vec<String> {
        let pattern = format!("^{}_([0-9]+|misc)", regex::escape(dependency));
        let Ok(matcher) = Regex::new(&pattern) else {
            tracing::warn!("invalid dependency pattern: {}", pattern);
            return Vec::new();
        };

        self.config
            .build_tasks
            .iter()
            .filter(|name| matcher.is_match(name))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
