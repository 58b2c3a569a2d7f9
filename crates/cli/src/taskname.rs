// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic names for generated tasks and suites.

/// Suffix marking a task that exists only to generate its real tasks.
const GEN_SUFFIX: &str = "_gen";

/// Name a generated sub-task or sub-suite.
///
/// The index is zero-padded to the decimal width of `total`, so producing
/// a different number of items changes every generated name, not just the
/// new ones.
pub fn name_generated_task(
    base: &str,
    index: usize,
    total: usize,
    variant: Option<&str>,
) -> String {
    let width = total.to_string().len();
    match variant {
        Some(variant) => format!("{base}_{index:0width$}_{variant}"),
        None => format!("{base}_{index:0width$}"),
    }
}

/// Strip the `_gen` suffix from a generating task's name.
pub fn remove_gen_suffix(task_name: &str) -> &str {
    task_name.strip_suffix(GEN_SUFFIX).unwrap_or(task_name)
}

#[cfg(test)]
#[path = "taskname_tests.rs"]
mod tests;
