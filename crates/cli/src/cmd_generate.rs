// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Generate command implementation.

use suitesplit::assemble::TaskAssembler;
use suitesplit::catalog::StatsFileCatalog;
use suitesplit::cli::GenerateArgs;
use suitesplit::config::GenerateConfig;
use suitesplit::generate;
use suitesplit::manifest::{FsUniverse, SuiteDefinition};
use suitesplit::render;

/// Run the generate command.
pub fn run(args: &GenerateArgs) -> anyhow::Result<()> {
    let config = GenerateConfig::load(&args.expansions)?;
    tracing::debug!(
        "generating sub-suites for task {} on {}",
        config.task,
        config.build_variant
    );

    let definition = SuiteDefinition::load(&args.root.join(&config.suites_dir), &config.suite)?;
    let universe = FsUniverse::new(&definition, args.root.clone());
    let catalog = StatsFileCatalog::new(args.stats.clone());

    let suites = generate::calculate_suites(&config, &catalog, &universe)?;
    tracing::debug!("created {} suites for {}", suites.len(), config.task);

    let tasks = TaskAssembler::new(&config).assemble(&suites)?;
    let files = render::render_all(&config, &definition, &suites, &tasks)?;
    render::write_files(&args.root.join(&config.output_dir), &files)?;

    Ok(())
}
