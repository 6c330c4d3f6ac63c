//! CSV catalog loader
//!
//! Resolves the source header row against the fixed column vocabulary
//! (fail-fast), then streams rows through the normalizer into the `food`
//! table. FTS maintenance is the schema triggers' job; the loader never
//! touches the index directly.

use std::collections::HashMap;

use rusqlite::Connection;

use foodcat_core::columns::{NUTRIENT_COUNT, NUTRIENTS, SOURCE_NAME, SOURCE_NAME_NORMALIZED};
use foodcat_core::normalize::normalize_row;

use crate::connection::BuildError;

/// Rows per write transaction during loading.
const BATCH_SIZE: usize = 1000;

/// Resolved positions of the source columns within the input header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    name: usize,
    name_normalized: Option<usize>,
    nutrients: [usize; NUTRIENT_COUNT],
}

impl ColumnMap {
    fn cell<'a>(&self, record: &'a csv::StringRecord, source: &str) -> Option<&'a str> {
        let index = if source == SOURCE_NAME {
            Some(self.name)
        } else if source == SOURCE_NAME_NORMALIZED {
            self.name_normalized
        } else {
            NUTRIENTS
                .iter()
                .position(|n| n.source == source)
                .map(|i| self.nutrients[i])
        };
        index.and_then(|i| record.get(i))
    }
}

/// Resolve the header row against the column vocabulary.
///
/// The display-name column and all eleven nutrient columns are required; any
/// missing header aborts the build, named in the error, before a single row
/// is read. The pre-normalized name column is used when present.
pub fn resolve_columns(headers: &csv::StringRecord) -> Result<ColumnMap, BuildError> {
    let positions: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h, i))
        .collect();

    let mut missing: Vec<String> = Vec::new();

    let name = match positions.get(SOURCE_NAME) {
        Some(&i) => i,
        None => {
            missing.push(SOURCE_NAME.to_string());
            0
        }
    };

    let mut nutrients = [0usize; NUTRIENT_COUNT];
    for (i, nutrient) in NUTRIENTS.iter().enumerate() {
        match positions.get(nutrient.source) {
            Some(&pos) => nutrients[i] = pos,
            None => missing.push(nutrient.source.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(BuildError::MissingColumns(missing));
    }

    Ok(ColumnMap {
        name,
        name_normalized: positions.get(SOURCE_NAME_NORMALIZED).copied(),
        nutrients,
    })
}

/// Result of loading the input into the base table
#[derive(Debug, Default)]
pub struct LoadResult {
    pub rows_loaded: usize,
    /// Nutrient cells dropped as malformed across all rows. The rows
    /// themselves still loaded.
    pub fields_skipped: usize,
}

/// Stream all remaining records from `reader` into the `food` table.
///
/// Inserts are grouped into savepoint batches for throughput; there are no
/// concurrent readers during a build, by design.
pub fn load_rows<R: std::io::Read>(
    conn: &Connection,
    reader: &mut csv::Reader<R>,
    columns: &ColumnMap,
) -> Result<LoadResult, BuildError> {
    let mut insert_stmt = conn.prepare_cached(
        "INSERT INTO food (
            name, name_normalized,
            calories_kcal_per_100g, protein_g_per_100g, fat_g_per_100g, carbs_g_per_100g,
            fiber_g_per_100g, sugar_g_per_100g, sodium_mg_per_100g, calcium_mg_per_100g,
            iron_mg_per_100g, vitamin_c_mg_per_100g, vitamin_b11_mg_per_100g
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )?;

    let mut result = LoadResult::default();

    // Explicit savepoints rather than conn.transaction(): the prepared
    // statement above already borrows conn.
    conn.execute_batch("SAVEPOINT load_batch")?;

    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        let row = normalize_row(|source| columns.cell(&record, source));
        let n = row.record.nutrients();

        insert_stmt.execute(rusqlite::params![
            row.record.name,
            row.record.name_normalized,
            n[0],
            n[1],
            n[2],
            n[3],
            n[4],
            n[5],
            n[6],
            n[7],
            n[8],
            n[9],
            n[10],
        ])?;

        result.rows_loaded += 1;
        result.fields_skipped += row.skipped_fields.len();

        if result.rows_loaded % BATCH_SIZE == 0 {
            conn.execute_batch("RELEASE load_batch; SAVEPOINT load_batch")?;
        }
    }

    conn.execute_batch("RELEASE load_batch")?;

    Ok(result)
}
