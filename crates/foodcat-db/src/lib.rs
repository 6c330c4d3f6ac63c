//! foodcat-db - Read-only access to a built food catalog
//!
//! This crate opens a finished catalog artifact and serves queries against
//! it. It never writes; all write operations live in `foodcat-builder`.

pub mod connection;
pub mod queries;

pub use connection::*;
pub use queries::*;
