//! foodcat-builder - Build pipeline for the food catalog SQLite artifact
//!
//! This crate owns all **write** operations against the catalog file: schema
//! creation, CSV ingestion, and the atomic build lifecycle. The companion
//! `foodcat-db` crate provides read-only access for query paths. A build
//! either publishes a complete artifact or leaves nothing behind.

pub mod build;
pub mod connection;
pub mod loader;
pub mod schema;

pub use build::{build_catalog, BuildSummary};
pub use connection::{BuildError, BuilderDb};
pub use loader::{load_rows, resolve_columns, ColumnMap, LoadResult};
pub use schema::{init_schema, SCHEMA_VERSION};
