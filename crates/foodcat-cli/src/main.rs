//! foodcat - CLI for building and querying the food catalog

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Build { csv, out } => commands::build::run(&cli, csv, out.as_deref()),
        Command::Status => commands::status::run(&cli),
        Command::Search {
            query,
            limit,
            prefix,
        } => commands::search::run(&cli, query, *limit, *prefix),
    }
}
