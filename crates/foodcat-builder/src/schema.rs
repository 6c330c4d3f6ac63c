//! Catalog schema creation
//!
//! Creates the base table, the external-content FTS5 index, the triggers that
//! keep the two in lockstep, and the ordering index on the normalized name.
//! Schema creation runs before any data loads; if any statement fails the
//! build aborts with an empty artifact.

use rusqlite::Connection;

use crate::connection::BuildError;

/// Catalog schema version, stamped into `catalog_meta`.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the catalog schema on a fresh database.
pub fn init_schema(conn: &Connection) -> Result<(), BuildError> {
    // Metadata table
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS catalog_meta (
            key TEXT PRIMARY KEY,
            value TEXT
        )",
    )?;

    // Base table. Nutrients are nullable: NULL means the source recorded no
    // value, which is distinct from zero.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS food (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            name_normalized TEXT NOT NULL,
            calories_kcal_per_100g REAL,
            protein_g_per_100g REAL,
            fat_g_per_100g REAL,
            carbs_g_per_100g REAL,
            fiber_g_per_100g REAL,
            sugar_g_per_100g REAL,
            sodium_mg_per_100g REAL,
            calcium_mg_per_100g REAL,
            iron_mg_per_100g REAL,
            vitamin_c_mg_per_100g REAL,
            vitamin_b11_mg_per_100g REAL
        )",
    )?;

    // External-content FTS5 index over the name columns. It indexes text
    // owned by `food` (content='food') rather than duplicating storage, keyed
    // by the same rowid.
    conn.execute_batch(
        "CREATE VIRTUAL TABLE IF NOT EXISTS food_fts USING fts5(
            name,
            name_normalized,
            content='food',
            content_rowid='id'
        )",
    )?;

    // Triggers keep food_fts in sync with every base-table mutation, so the
    // loader never touches the index directly. The update trigger must delete
    // the stale text before inserting the fresh text.
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS food_ai AFTER INSERT ON food BEGIN
            INSERT INTO food_fts(rowid, name, name_normalized)
            VALUES (new.id, new.name, new.name_normalized);
        END;

        CREATE TRIGGER IF NOT EXISTS food_ad AFTER DELETE ON food BEGIN
            INSERT INTO food_fts(food_fts, rowid, name, name_normalized)
            VALUES ('delete', old.id, old.name, old.name_normalized);
        END;

        CREATE TRIGGER IF NOT EXISTS food_au AFTER UPDATE ON food BEGIN
            INSERT INTO food_fts(food_fts, rowid, name, name_normalized)
            VALUES ('delete', old.id, old.name, old.name_normalized);
            INSERT INTO food_fts(rowid, name, name_normalized)
            VALUES (new.id, new.name, new.name_normalized);
        END;",
    )?;

    // Ordering index for prefix/equality lookups outside full-text search
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_food_name_norm ON food(name_normalized)",
    )?;

    // Stamp version
    conn.execute(
        "INSERT OR REPLACE INTO catalog_meta (key, value) VALUES ('version', ?1)",
        [&SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}
