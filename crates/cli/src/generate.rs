// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The suite-calculation pipeline.
//!
//! Decides, per run, whether the suite is split from runtime history or
//! divided evenly by the fallback policy. Recoverable conditions (no
//! history, everything filtered out, a degraded statistics service) are
//! absorbed here and still yield a valid partition; every other failure
//! aborts the run with no partial output.

use anyhow::Context;
use chrono::{Duration, Utc};

use crate::catalog::{CatalogError, HistoryWindow, RuntimeCatalog};
use crate::config::GenerateConfig;
use crate::history;
use crate::manifest::TestUniverse;
use crate::partition;
use crate::suite::Suite;

/// Divide the suite's tests based on history for the lookback window,
/// falling back to the fixed split when the history is unusable.
pub fn calculate_suites(
    config: &GenerateConfig,
    catalog: &dyn RuntimeCatalog,
    universe: &dyn TestUniverse,
) -> anyhow::Result<Vec<Suite>> {
    let window = lookback_window(config);

    let records = match catalog.test_runtimes(&window) {
        Ok(records) => records,
        Err(CatalogError::Unavailable) => {
            // The one failure worth absorbing; everything else propagates.
            tracing::warn!("statistics service unavailable, dividing tests evenly among suites");
            return Ok(fallback_suites(config, universe));
        }
        Err(err) => {
            return Err(err).context("failed to fetch runtime history");
        }
    };

    if records.is_empty() {
        tracing::debug!("no runtime history, using fallback suites");
        return Ok(fallback_suites(config, universe));
    }

    let filtered = history::filter_runtimes(&records, universe, config.selected_tests.as_ref());
    if filtered.is_empty() {
        tracing::debug!("no test runtimes survived filtering, using fallback suites");
        return Ok(fallback_suites(config, universe));
    }

    Ok(partition::partition_tests(
        &config.suite,
        &filtered,
        config.target_runtime_secs,
        config.max_suites,
        config.max_tests_per_suite,
    ))
}

fn fallback_suites(config: &GenerateConfig, universe: &dyn TestUniverse) -> Vec<Suite> {
    tracing::debug!(
        "splitting {} into {} fallback suites",
        config.suite,
        config.fallback_suite_count
    );
    partition::fallback_partition(&config.suite, &universe.tests(), config.fallback_suite_count)
}

/// The history window: the last `lookback_days` days, ending today.
fn lookback_window(config: &GenerateConfig) -> HistoryWindow {
    let before_date = Utc::now().date_naive();
    let after_date = before_date - Duration::days(config.lookback_days);
    HistoryWindow {
        project: config.project.clone(),
        variant: config.build_variant.clone(),
        task: config.task.clone(),
        after_date,
        before_date,
    }
}

#[cfg(test)]
#[path = "generate_tests.rs"]
mod tests;
