//! Catalog connection management

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Catalog access errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog not found at {0}")]
    NotFound(PathBuf),

    #[error("not a food catalog: {0}")]
    NotACatalog(PathBuf),

    #[error("catalog version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Expected catalog version. The artifact is immutable and there are no
/// migrations; anything else means the file was produced by an incompatible
/// builder.
pub const CATALOG_VERSION: i32 = 1;

/// Read-only connection to a built catalog
pub struct CatalogDb {
    pub(crate) conn: Connection,
    path: PathBuf,
}

impl std::fmt::Debug for CatalogDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogDb")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl CatalogDb {
    /// Open the catalog at a specific path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(CatalogError::NotFound(path));
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let db = Self { conn, path };
        db.check_version()?;

        Ok(db)
    }

    fn check_version(&self) -> Result<(), CatalogError> {
        let version: Option<i32> = self
            .conn
            .query_row(
                "SELECT CAST(value AS INTEGER) FROM catalog_meta WHERE key = 'version'",
                [],
                |row| row.get(0),
            )
            .ok();

        match version {
            None => Err(CatalogError::NotACatalog(self.path.clone())),
            Some(found) if found != CATALOG_VERSION => Err(CatalogError::VersionMismatch {
                expected: CATALOG_VERSION,
                found,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Get the catalog file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the underlying connection (for custom queries)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get catalog statistics
    pub fn stats(&self) -> Result<CatalogStats, CatalogError> {
        let food_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM food", [], |row| row.get(0))?;

        let fts_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM food_fts", [], |row| row.get(0))?;

        let built_at: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM catalog_meta WHERE key = 'built_at'",
                [],
                |row| row.get(0),
            )
            .ok();

        let db_size = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        Ok(CatalogStats {
            version: CATALOG_VERSION,
            food_count,
            fts_count,
            built_at,
            db_path: self.path.clone(),
            db_size_bytes: db_size,
        })
    }
}

/// Catalog statistics
#[derive(Debug, Clone)]
pub struct CatalogStats {
    pub version: i32,
    pub food_count: i64,
    pub fts_count: i64,
    pub built_at: Option<String>,
    pub db_path: PathBuf,
    pub db_size_bytes: u64,
}

impl CatalogStats {
    /// Format catalog size as human-readable string
    pub fn format_size(&self) -> String {
        let bytes = self.db_size_bytes as f64;
        if bytes < 1024.0 {
            format!("{} B", bytes)
        } else if bytes < 1024.0 * 1024.0 {
            format!("{:.1} KB", bytes / 1024.0)
        } else {
            format!("{:.1} MB", bytes / (1024.0 * 1024.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = CatalogDb::open(tmp.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_open_rejects_foreign_sqlite_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("other.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE t (x INTEGER)").unwrap();
        }
        let err = CatalogDb::open(&path).unwrap_err();
        assert!(matches!(err, CatalogError::NotACatalog(_)));
    }

    #[test]
    fn test_open_rejects_version_mismatch() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("future.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE catalog_meta (key TEXT PRIMARY KEY, value TEXT);
                 INSERT INTO catalog_meta (key, value) VALUES ('version', '99');",
            )
            .unwrap();
        }
        let err = CatalogDb::open(&path).unwrap_err();
        match err {
            CatalogError::VersionMismatch { expected, found } => {
                assert_eq!(expected, CATALOG_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected VersionMismatch, got {other:?}"),
        }
    }
}
