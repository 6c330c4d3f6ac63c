//! Search command - query a built catalog

use anyhow::Result;
use foodcat_db::{CatalogDb, CatalogFood};

use crate::cli::{Cli, OutputFormat};
use crate::output::colors;

pub fn run(cli: &Cli, query: &str, limit: i64, prefix: bool) -> Result<()> {
    let db = CatalogDb::open(&cli.db)?;

    let hits = if prefix {
        db.lookup_prefix(query, limit)?
    } else {
        db.search(query, limit)?
    };

    match cli.format {
        OutputFormat::Human => {
            if hits.is_empty() {
                println!("No matches for '{query}'");
                return Ok(());
            }
            for hit in &hits {
                println!("{}", format_hit(hit));
            }
            println!();
            println!(
                "{} match{}",
                colors::format_count(hits.len() as i64),
                if hits.len() == 1 { "" } else { "es" }
            );
        }
        OutputFormat::Json => {
            for hit in &hits {
                let line = serde_json::json!({
                    "id": hit.id,
                    "food": hit.food,
                });
                println!("{}", serde_json::to_string(&line)?);
            }
        }
    }

    Ok(())
}

fn format_hit(hit: &CatalogFood) -> String {
    let kcal = match hit.food.calories_kcal {
        Some(v) => format!("{v:.0} kcal"),
        None => "- kcal".to_string(),
    };
    format!(
        "  {:>5}  {}  {}",
        hit.id,
        colors::value(&hit.food.name),
        colors::label(&kcal)
    )
}
