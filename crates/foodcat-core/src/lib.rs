//! foodcat-core - Canonical record types and normalization for the food catalog
//!
//! This crate defines the shape of a catalog entry, the fixed source column
//! vocabulary, and the pure normalization step that turns one raw CSV row into
//! one canonical record. It has no I/O and no database dependency.

pub mod columns;
pub mod normalize;
pub mod types;

pub use columns::*;
pub use normalize::*;
pub use types::*;
