//! Fixed source column vocabulary
//!
//! The CSV export names its columns with a fixed, case-sensitive vocabulary.
//! The mapping below ties each source header to the column it lands in inside
//! the `food` table. Order matters: `NUTRIENTS` is the catalog column order.

/// Source header for the display name.
pub const SOURCE_NAME: &str = "food";

/// Source header for the pre-normalized name. Optional in the input.
pub const SOURCE_NAME_NORMALIZED: &str = "food_normalized";

/// Number of nutrient columns in the catalog.
pub const NUTRIENT_COUNT: usize = 11;

/// One nutrient column: source CSV header and catalog column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutrientColumn {
    pub source: &'static str,
    pub column: &'static str,
}

/// All nutrient columns, in catalog column order.
pub const NUTRIENTS: [NutrientColumn; NUTRIENT_COUNT] = [
    NutrientColumn {
        source: "Calories (kcal per 100g)",
        column: "calories_kcal_per_100g",
    },
    NutrientColumn {
        source: "Protein (g per 100g)",
        column: "protein_g_per_100g",
    },
    NutrientColumn {
        source: "Fat (g per 100g)",
        column: "fat_g_per_100g",
    },
    NutrientColumn {
        source: "Carbohydrates (g per 100g)",
        column: "carbs_g_per_100g",
    },
    NutrientColumn {
        source: "Dietary Fiber (g per 100g)",
        column: "fiber_g_per_100g",
    },
    NutrientColumn {
        source: "Sugars (g per 100g)",
        column: "sugar_g_per_100g",
    },
    NutrientColumn {
        source: "Sodium (mg per 100g)",
        column: "sodium_mg_per_100g",
    },
    NutrientColumn {
        source: "Calcium (mg per 100g)",
        column: "calcium_mg_per_100g",
    },
    NutrientColumn {
        source: "Iron (mg per 100g)",
        column: "iron_mg_per_100g",
    },
    NutrientColumn {
        source: "Vitamin C (mg per 100g)",
        column: "vitamin_c_mg_per_100g",
    },
    NutrientColumn {
        source: "Vitamin B11 (mg per 100g)",
        column: "vitamin_b11_mg_per_100g",
    },
];

/// Headers that must be present in the input. `food_normalized` is not
/// required; the normalizer derives the key from the display name instead.
pub fn required_headers() -> impl Iterator<Item = &'static str> {
    std::iter::once(SOURCE_NAME).chain(NUTRIENTS.iter().map(|n| n.source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_headers_count() {
        assert_eq!(required_headers().count(), 1 + NUTRIENT_COUNT);
    }

    #[test]
    fn test_normalized_name_header_is_optional() {
        assert!(!required_headers().any(|h| h == SOURCE_NAME_NORMALIZED));
    }

    #[test]
    fn test_catalog_columns_are_unique() {
        for (i, a) in NUTRIENTS.iter().enumerate() {
            for b in NUTRIENTS.iter().skip(i + 1) {
                assert_ne!(a.column, b.column);
                assert_ne!(a.source, b.source);
            }
        }
    }
}
