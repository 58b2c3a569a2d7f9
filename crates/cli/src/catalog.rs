// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The runtime-history catalog boundary.
//!
//! Partitioning never talks to the analytics service directly; it asks a
//! [`RuntimeCatalog`] for the average runtimes recorded in a lookback
//! window. The shipped implementation reads the JSON export an upstream
//! fetch job leaves next to the build; in-process implementations (and
//! the service-unavailable path) are exercised through the trait.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::history::TestRuntime;

/// Query key for one task's runtime history.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    pub project: String,
    pub variant: String,
    pub task: String,
    pub after_date: NaiveDate,
    pub before_date: NaiveDate,
}

/// Failures a catalog can report.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The statistics service is temporarily unavailable.
    ///
    /// The only failure the generator absorbs by falling back to the
    /// fixed suite split; every other variant propagates to the caller.
    #[error("statistics service unavailable")]
    Unavailable,

    #[error("failed to read stats export {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed stats export {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of historical average test runtimes.
///
/// An empty result is a valid "no signal" answer, not an error.
pub trait RuntimeCatalog {
    fn test_runtimes(&self, window: &HistoryWindow) -> Result<Vec<TestRuntime>, CatalogError>;
}

/// One record of the upstream stats export.
#[derive(Debug, Deserialize)]
struct StatsRecord {
    test_name: String,
    avg_duration_secs: f64,
}

/// Catalog backed by the JSON stats export of an upstream fetch job.
pub struct StatsFileCatalog {
    path: PathBuf,
}

impl StatsFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RuntimeCatalog for StatsFileCatalog {
    fn test_runtimes(&self, window: &HistoryWindow) -> Result<Vec<TestRuntime>, CatalogError> {
        if !self.path.exists() {
            tracing::debug!("no stats export at {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<StatsRecord> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "loaded {} stats records for {}/{}/{} ({} to {})",
            records.len(),
            window.project,
            window.variant,
            window.task,
            window.after_date,
            window.before_date
        );

        Ok(records
            .into_iter()
            .map(|record| TestRuntime::new(record.test_name, record.avg_duration_secs))
            .collect())
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
