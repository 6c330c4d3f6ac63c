//! Build command - construct the catalog artifact from a CSV export

use std::path::Path;

use anyhow::Result;
use foodcat_builder::build_catalog;

use crate::cli::{Cli, OutputFormat};
use crate::output::colors;

pub fn run(cli: &Cli, csv: &Path, out: Option<&Path>) -> Result<()> {
    let out_path = out.unwrap_or(&cli.db);
    let summary = build_catalog(csv, out_path)?;

    match cli.format {
        OutputFormat::Human => {
            println!(
                "{}",
                colors::success(&format!(
                    "Built catalog at {} with {} foods",
                    summary.db_path.display(),
                    colors::format_count(summary.rows_loaded as i64)
                ))
            );
            if summary.fields_skipped > 0 {
                eprintln!(
                    "{}",
                    colors::warning(&format!(
                        "{} malformed nutrient values dropped (rows kept)",
                        summary.fields_skipped
                    ))
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "ok",
                "db_path": summary.db_path.to_string_lossy(),
                "rows_loaded": summary.rows_loaded,
                "fields_skipped": summary.fields_skipped,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
