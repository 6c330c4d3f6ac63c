//! Record normalization
//!
//! Turns one raw source row into one canonical [`FoodRecord`]. Pure and
//! deterministic: output depends only on the input row, no I/O, no shared
//! state.

use crate::columns::{NUTRIENTS, SOURCE_NAME, SOURCE_NAME_NORMALIZED};
use crate::types::FoodRecord;

/// Normalize a display name into its stable matching/sort key.
///
/// Idempotent: `normalize_name(normalize_name(s)) == normalize_name(s)`.
pub fn normalize_name(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Outcome of parsing one nutrient cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedNutrient {
    /// A finite numeric value.
    Value(f64),
    /// Empty cell or the "na" sentinel: no value recorded.
    Missing,
    /// Unparsable or non-finite text, dropped by the lenient policy.
    Malformed,
}

impl ParsedNutrient {
    pub fn value(self) -> Option<f64> {
        match self {
            ParsedNutrient::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Parse one nutrient cell.
///
/// Empty string and the case-insensitive token "na" mean "absent", distinct
/// from zero. Anything else must parse as a finite number; a cell that does
/// not is dropped rather than rejecting the whole row, since losing the row
/// is worse than losing one field.
pub fn parse_nutrient(raw: &str) -> ParsedNutrient {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") {
        return ParsedNutrient::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => ParsedNutrient::Value(v),
        _ => ParsedNutrient::Malformed,
    }
}

/// One normalized row plus the per-field diagnostics the lenient policy
/// would otherwise swallow.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRow {
    pub record: FoodRecord,
    /// Source headers whose cells were dropped as malformed. Empty cells and
    /// the "na" sentinel are legitimate absences and are not listed.
    pub skipped_fields: Vec<&'static str>,
}

/// Normalize one raw row into a canonical record.
///
/// `get` looks a cell up by source header name, returning `None` when the
/// column is absent from the input entirely.
///
/// Name resolution prefers the display-name column, falls back to the
/// pre-normalized column, and bottoms out at the empty string: an unnamed row
/// still loads, the schema only requires the text columns to be non-null.
pub fn normalize_row<'a, F>(get: F) -> NormalizedRow
where
    F: Fn(&str) -> Option<&'a str>,
{
    let display = get(SOURCE_NAME).map(str::trim).unwrap_or("");
    let prenormalized = get(SOURCE_NAME_NORMALIZED).map(str::trim).unwrap_or("");

    let name = if !display.is_empty() {
        display
    } else {
        prenormalized
    };

    // A supplied pre-normalized form wins, but is re-normalized all the same;
    // normalization is idempotent, so a clean source passes through unchanged.
    let name_normalized = if !prenormalized.is_empty() {
        normalize_name(prenormalized)
    } else {
        normalize_name(name)
    };

    let mut row = NormalizedRow {
        record: FoodRecord {
            name: name.to_string(),
            name_normalized,
            ..FoodRecord::default()
        },
        skipped_fields: Vec::new(),
    };

    for (i, nutrient) in NUTRIENTS.iter().enumerate() {
        let parsed = match get(nutrient.source) {
            Some(cell) => parse_nutrient(cell),
            None => ParsedNutrient::Missing,
        };
        if parsed == ParsedNutrient::Malformed {
            row.skipped_fields.push(nutrient.source);
        }
        row.record.set_nutrient(i, parsed.value());
    }

    row
}
