//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Splits a test suite into time-balanced CI tasks using runtime history
#[derive(Parser)]
#[command(name = "suitesplit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate time-balanced sub-suites and their CI tasks
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Expansions file materialized by the CI system
    #[arg(long, value_name = "FILE", env = "SUITESPLIT_EXPANSIONS")]
    pub expansions: PathBuf,

    /// Runtime stats export left by the upstream analytics fetch
    #[arg(long, value_name = "FILE", default_value = "test_stats.json")]
    pub stats: PathBuf,

    /// Project root that test paths resolve against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
