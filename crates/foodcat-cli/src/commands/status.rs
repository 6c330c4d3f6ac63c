//! Status command - catalog statistics

use anyhow::Result;
use foodcat_db::CatalogDb;

use crate::cli::{Cli, OutputFormat};
use crate::output::colors;

pub fn run(cli: &Cli) -> Result<()> {
    let db = CatalogDb::open(&cli.db)?;
    let stats = db.stats()?;

    match cli.format {
        OutputFormat::Human => {
            println!("{}", colors::header("Catalog Status"));
            println!();
            println!("  {}: {}", colors::label("Catalog"), stats.db_path.display());
            println!("  {}: {}", colors::label("Size"), stats.format_size());
            println!(
                "  {}: {}",
                colors::label("Version"),
                colors::value(&stats.version.to_string())
            );
            println!();
            println!(
                "  {}: {}",
                colors::label("Foods"),
                colors::format_count(stats.food_count)
            );
            println!(
                "  {}: {}",
                colors::label("Indexed names"),
                colors::format_count(stats.fts_count)
            );
            if let Some(built_at) = &stats.built_at {
                println!("  {}: {}", colors::label("Built"), colors::value(built_at));
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "db_path": stats.db_path.to_string_lossy(),
                "db_size_bytes": stats.db_size_bytes,
                "version": stats.version,
                "food_count": stats.food_count,
                "fts_count": stats.fts_count,
                "built_at": stats.built_at,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
