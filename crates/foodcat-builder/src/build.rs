//! Build orchestration
//!
//! Owns the artifact lifecycle end to end: validate the input, delete any
//! existing artifact, create the schema, load, finalize, report. A failed
//! build leaves no artifact behind; a stale or partial catalog masquerading
//! as valid is strictly worse than a missing one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::connection::{BuildError, BuilderDb};
use crate::loader::{self, ColumnMap, LoadResult};
use crate::schema;

/// Result of a completed build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Rows in the final `food` table.
    pub rows_loaded: usize,
    /// Nutrient cells dropped by the lenient per-field policy.
    pub fields_skipped: usize,
    pub db_path: PathBuf,
}

/// Build the catalog artifact at `out_path` from the CSV at `csv_path`.
///
/// The previous artifact (if any) is replaced wholesale; there is no
/// incremental path. Structural validation of the input happens before the
/// output path is touched, so a defective input never destroys an existing
/// catalog.
pub fn build_catalog(csv_path: &Path, out_path: &Path) -> Result<BuildSummary, BuildError> {
    if !csv_path.exists() {
        return Err(BuildError::InputNotFound(csv_path.to_path_buf()));
    }

    // flexible: ragged rows surface as absent fields, per the lenient
    // row-level policy. Header defects are still fatal below.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)?;
    let columns = loader::resolve_columns(&reader.headers()?.clone())?;

    remove_artifact(out_path)?;

    let result = build_into(out_path, &mut reader, &columns);
    if result.is_err() {
        // Connection is closed by the time build_into returns.
        let _ = remove_artifact(out_path);
    }
    result
}

fn build_into(
    out_path: &Path,
    reader: &mut csv::Reader<fs::File>,
    columns: &ColumnMap,
) -> Result<BuildSummary, BuildError> {
    let mut db = BuilderDb::create(out_path)?;

    // Schema strictly before load: the triggers must exist before the first
    // insert or the index-consistency invariant is broken.
    schema::init_schema(db.connection())?;

    let loaded = loader::load_rows(db.connection(), reader, columns)?;

    finalize(&mut db, &loaded)?;

    let rows_loaded: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM food", [], |row| row.get(0))?;

    Ok(BuildSummary {
        rows_loaded: rows_loaded as usize,
        fields_skipped: loaded.fields_skipped,
        db_path: out_path.to_path_buf(),
    })
}

/// Stamp build metadata, then compact and recompute planner statistics so
/// full-text and index lookups are fast on the consumer's first use.
fn finalize(db: &mut BuilderDb, loaded: &LoadResult) -> Result<(), BuildError> {
    let built_at = chrono::Utc::now().to_rfc3339();
    let source_rows = loaded.rows_loaded.to_string();

    db.transaction(|conn| {
        conn.execute(
            "INSERT OR REPLACE INTO catalog_meta (key, value) VALUES ('built_at', ?1)",
            [&built_at],
        )?;
        conn.execute(
            "INSERT OR REPLACE INTO catalog_meta (key, value) VALUES ('source_rows', ?1)",
            [&source_rows],
        )?;
        Ok(())
    })?;

    db.connection()
        .execute_batch("INSERT INTO food_fts(food_fts) VALUES('optimize')")?;
    // WAL is a build-time setting; the shipped artifact must be a single
    // file that read-only consumers can open without WAL sidecars.
    db.connection()
        .pragma_update(None, "journal_mode", "DELETE")?;
    // VACUUM cannot run inside a transaction
    db.connection().execute_batch("VACUUM")?;
    db.connection().execute_batch("ANALYZE")?;

    Ok(())
}

/// Remove the artifact and its WAL/SHM siblings, if present.
fn remove_artifact(path: &Path) -> Result<(), BuildError> {
    for suffix in ["", "-wal", "-shm"] {
        let mut target = path.as_os_str().to_owned();
        target.push(suffix);
        let target = PathBuf::from(target);
        if target.exists() {
            fs::remove_file(&target)?;
        }
    }
    Ok(())
}
