//! Read-write database connection for catalog builds

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Build pipeline errors
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("input missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Read-write connection to a catalog file under construction
pub struct BuilderDb {
    pub(crate) conn: Connection,
    path: PathBuf,
}

impl BuilderDb {
    /// Create (or open) the catalog file at `path` for writing.
    ///
    /// The orchestrator removes any pre-existing artifact first, so in
    /// practice this always starts from an empty file.
    pub fn create(path: &Path) -> Result<Self, BuildError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = OFF;",
        )?;

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Get the catalog file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get a mutable reference to the underlying connection
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Execute a closure within a transaction
    pub fn transaction<F, T>(&mut self, f: F) -> Result<T, BuildError>
    where
        F: FnOnce(&Connection) -> Result<T, BuildError>,
    {
        let tx = self.conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_makes_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("dir").join("catalog.db");
        let db = BuilderDb::create(&path).unwrap();
        assert_eq!(db.path(), path);
        assert!(path.exists());
    }

    #[test]
    fn test_missing_columns_message_names_offenders() {
        let err = BuildError::MissingColumns(vec![
            "food".to_string(),
            "Iron (mg per 100g)".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("food"));
        assert!(msg.contains("Iron (mg per 100g)"));
    }
}
