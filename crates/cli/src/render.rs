// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of generated suite definitions and the task document.
//!
//! Every document is rendered in memory first; files reach disk only
//! after the whole set rendered successfully, so a failed run leaves no
//! partial output behind.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::assemble::GeneratedTask;
use crate::config::GenerateConfig;
use crate::manifest::SuiteDefinition;
use crate::suite::Suite;

fn header(source_suite: &str) -> String {
    format!(
        "# DO NOT EDIT THIS FILE. All manual edits will be lost.\n\
         # Generated by suitesplit from the {source_suite} suite definition.\n"
    )
}

/// Render one generated suite: the source document with its selection
/// replaced by the suite's tests and any inherited excludes dropped.
fn render_suite(
    source: &SuiteDefinition,
    source_suite: &str,
    suite: &Suite,
    total: usize,
) -> anyhow::Result<(String, String)> {
    let mut definition = source.clone();
    definition.selector.roots = suite.tests().to_vec();
    definition.selector.exclude_files.clear();

    let body = serde_yaml::to_string(&definition)
        .with_context(|| format!("failed to render suite {}", suite.display_name(total)))?;
    let file_name = format!("{}.yml", suite.display_name(total));
    Ok((file_name, format!("{}{}", header(source_suite), body)))
}

/// Render the misc suite: the source selection untouched, with every
/// partitioned test appended to the excludes. Whatever never showed up
/// in runtime history still runs here.
fn render_misc_suite(
    source: &SuiteDefinition,
    source_suite: &str,
    partitioned_tests: &[String],
) -> anyhow::Result<(String, String)> {
    let mut definition = source.clone();
    definition
        .selector
        .exclude_files
        .extend(partitioned_tests.iter().cloned());

    let body = serde_yaml::to_string(&definition)
        .with_context(|| format!("failed to render misc suite for {source_suite}"))?;
    let file_name = format!("{source_suite}_misc.yml");
    Ok((file_name, format!("{}{}", header(source_suite), body)))
}

/// Render every output document for a run: one definition per generated
/// suite, the misc definition, and the `{task}.json` task document.
pub fn render_all(
    config: &GenerateConfig,
    source: &SuiteDefinition,
    suites: &[Suite],
    tasks: &[GeneratedTask],
) -> anyhow::Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();
    let total = suites.len();

    for suite in suites {
        let (name, contents) = render_suite(source, &config.suite, suite, total)?;
        files.insert(name, contents);
    }

    let partitioned: Vec<String> = suites
        .iter()
        .flat_map(|suite| suite.tests().iter().cloned())
        .collect();
    let (name, contents) = render_misc_suite(source, &config.suite, &partitioned)?;
    files.insert(name, contents);

    let document = serde_json::to_string_pretty(tasks)
        .with_context(|| format!("failed to render task document for {}", config.task))?;
    files.insert(format!("{}.json", config.task), document);

    Ok(files)
}

/// Write the rendered documents, creating the output directory as needed.
pub fn write_files(dir: &Path, files: &BTreeMap<String, String>) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    for (name, contents) in files {
        let path = dir.join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
