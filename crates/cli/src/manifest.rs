// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source suite definitions and the test universe they provide.
//!
//! A suite definition is a YAML document whose `selector` names the test
//! files the suite runs. The `roots` list doubles as the authoritative
//! test universe during partitioning, and the whole document is the
//! template the generated sub-suite definitions are rendered from.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Test selection of a suite definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selector {
    /// Ordered test paths the suite runs.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Tests excluded from the selection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_files: Vec<String>,
}

/// A suite definition document.
///
/// Only the selector is interpreted; every other key (executor settings,
/// fixture options, ...) is carried through untouched when re-rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteDefinition {
    pub selector: Selector,

    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

impl SuiteDefinition {
    /// Load `{suite}.yml` from the suites directory.
    pub fn load(suites_dir: &Path, suite: &str) -> anyhow::Result<Self> {
        let path = suites_dir.join(format!("{suite}.yml"));
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read suite definition {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid suite definition {}", path.display()))
    }
}

/// The authoritative test listing for one suite.
pub trait TestUniverse {
    /// Ordered test identifiers belonging to the suite.
    fn tests(&self) -> Vec<String>;

    /// Whether the test is still retrievable.
    fn exists(&self, test_name: &str) -> bool;
}

/// Universe backed by a suite definition and the filesystem.
pub struct FsUniverse {
    tests: Vec<String>,
    root: PathBuf,
}

impl FsUniverse {
    /// Build the universe from a definition's roots, resolving existence
    /// checks relative to `root`.
    pub fn new(definition: &SuiteDefinition, root: impl Into<PathBuf>) -> Self {
        Self {
            tests: definition.selector.roots.clone(),
            root: root.into(),
        }
    }
}

impl TestUniverse for FsUniverse {
    fn tests(&self) -> Vec<String> {
        self.tests.clone()
    }

    fn exists(&self, test_name: &str) -> bool {
        self.root.join(test_name).exists()
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
