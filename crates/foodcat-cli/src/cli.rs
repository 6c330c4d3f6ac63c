//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Conventional location of the catalog artifact
pub const DEFAULT_DB_PATH: &str = "data/food_catalog.db";

/// CLI for building and querying the food catalog
#[derive(Parser, Debug)]
#[command(name = "foodcat")]
#[command(version)]
#[command(about = "Build and query the embedded food catalog")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Catalog database path
    #[arg(long, global = true, env = "FOODCAT_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the catalog from a nutrition CSV export
    Build {
        /// Path to the per-100g nutrition CSV
        #[arg(long)]
        csv: PathBuf,

        /// Output path for the catalog (defaults to the --db path)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show catalog statistics
    Status,

    /// Search the catalog by food name
    Search {
        /// Search query
        query: String,

        /// Limit results
        #[arg(short = 'n', long, default_value = "20")]
        limit: i64,

        /// Match on normalized-name prefix instead of full-text search
        #[arg(long)]
        prefix: bool,
    },
}
