//! Catalog query functions

use crate::connection::{CatalogDb, CatalogError};
use foodcat_core::{normalize_name, FoodRecord};

/// One catalog entry with its assigned identity
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFood {
    pub id: i64,
    pub food: FoodRecord,
}

impl CatalogDb {
    /// Full-text search over food names, ranked by relevance
    pub fn search(&self, query: &str, limit: i64) -> Result<Vec<CatalogFood>, CatalogError> {
        // Quote each term so user input cannot inject FTS5 operators
        let fts_query: String = query
            .split_whitespace()
            .filter(|w| !w.is_empty())
            .map(|w| format!("\"{}\"", w.replace('"', "")))
            .collect::<Vec<_>>()
            .join(" OR ");

        if fts_query.is_empty() {
            return Ok(Vec::new());
        }

        let sql = r#"
            SELECT
                f.id, f.name, f.name_normalized,
                f.calories_kcal_per_100g, f.protein_g_per_100g, f.fat_g_per_100g,
                f.carbs_g_per_100g, f.fiber_g_per_100g, f.sugar_g_per_100g,
                f.sodium_mg_per_100g, f.calcium_mg_per_100g, f.iron_mg_per_100g,
                f.vitamin_c_mg_per_100g, f.vitamin_b11_mg_per_100g
            FROM food_fts fts
            JOIN food f ON fts.rowid = f.id
            WHERE food_fts MATCH ?
            ORDER BY bm25(food_fts)
            LIMIT ?
        "#;

        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(rusqlite::params![fts_query, limit], |row| {
            Ok(row_to_catalog_food(row))
        })?;

        let mut foods = Vec::new();
        for row in rows {
            foods.push(row?);
        }
        Ok(foods)
    }

    /// Prefix lookup on the normalized name, in normalized-name order.
    ///
    /// The prefix is normalized first, so `"  Chick"` finds `chicken breast`.
    pub fn lookup_prefix(&self, prefix: &str, limit: i64) -> Result<Vec<CatalogFood>, CatalogError> {
        let normalized = normalize_name(prefix);
        let escaped = normalized
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("{escaped}%");

        let sql = r#"
            SELECT
                id, name, name_normalized,
                calories_kcal_per_100g, protein_g_per_100g, fat_g_per_100g,
                carbs_g_per_100g, fiber_g_per_100g, sugar_g_per_100g,
                sodium_mg_per_100g, calcium_mg_per_100g, iron_mg_per_100g,
                vitamin_c_mg_per_100g, vitamin_b11_mg_per_100g
            FROM food
            WHERE name_normalized LIKE ? ESCAPE '\'
            ORDER BY name_normalized
            LIMIT ?
        "#;

        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(rusqlite::params![pattern, limit], |row| {
            Ok(row_to_catalog_food(row))
        })?;

        let mut foods = Vec::new();
        for row in rows {
            foods.push(row?);
        }
        Ok(foods)
    }

    /// Fetch a single entry by identity
    pub fn get(&self, id: i64) -> Result<Option<CatalogFood>, CatalogError> {
        let sql = r#"
            SELECT
                id, name, name_normalized,
                calories_kcal_per_100g, protein_g_per_100g, fat_g_per_100g,
                carbs_g_per_100g, fiber_g_per_100g, sugar_g_per_100g,
                sodium_mg_per_100g, calcium_mg_per_100g, iron_mg_per_100g,
                vitamin_c_mg_per_100g, vitamin_b11_mg_per_100g
            FROM food
            WHERE id = ?
        "#;

        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query_map([id], |row| Ok(row_to_catalog_food(row)))?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }
}

/// Convert a database row to a CatalogFood
fn row_to_catalog_food(row: &rusqlite::Row) -> CatalogFood {
    CatalogFood {
        id: row.get(0).unwrap_or(0),
        food: FoodRecord {
            name: row.get(1).unwrap_or_default(),
            name_normalized: row.get(2).unwrap_or_default(),
            calories_kcal: row.get(3).ok(),
            protein_g: row.get(4).ok(),
            fat_g: row.get(5).ok(),
            carbs_g: row.get(6).ok(),
            fiber_g: row.get(7).ok(),
            sugar_g: row.get(8).ok(),
            sodium_mg: row.get(9).ok(),
            calcium_mg: row.get(10).ok(),
            iron_mg: row.get(11).ok(),
            vitamin_c_mg: row.get(12).ok(),
            vitamin_b11_mg: row.get(13).ok(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::CATALOG_VERSION;
    use std::path::PathBuf;

    const FULL_HEADER: &str = "food,food_normalized,Calories (kcal per 100g),Protein (g per 100g),Fat (g per 100g),Carbohydrates (g per 100g),Dietary Fiber (g per 100g),Sugars (g per 100g),Sodium (mg per 100g),Calcium (mg per 100g),Iron (mg per 100g),Vitamin C (mg per 100g),Vitamin B11 (mg per 100g)";

    fn build_fixture(dir: &std::path::Path) -> PathBuf {
        let csv_path = dir.join("nutrition.csv");
        std::fs::write(
            &csv_path,
            format!(
                "{FULL_HEADER}\n\
                 Apple,apple,52,0.3,0.2,14,2.4,10,1,6,0.1,4.6,0.003\n\
                 Apple Pie,apple pie,237,2,11,34,1.6,16,201,11,0.5,1.7,NA\n\
                 Chicken Breast,chicken breast,165,31,3.6,0,0,0,74,15,1,0,0.004\n"
            ),
        )
        .unwrap();
        let out_path = dir.join("food_catalog.db");
        foodcat_builder::build_catalog(&csv_path, &out_path).unwrap();
        out_path
    }

    #[test]
    fn test_stats_reflect_build() {
        let tmp = tempfile::tempdir().unwrap();
        let db = CatalogDb::open(build_fixture(tmp.path())).unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.food_count, 3);
        assert_eq!(stats.fts_count, 3);
        assert_eq!(stats.version, CATALOG_VERSION);
        assert!(stats.built_at.is_some());
        assert!(stats.db_size_bytes > 0);
    }

    #[test]
    fn test_search_matches_and_ranks() {
        let tmp = tempfile::tempdir().unwrap();
        let db = CatalogDb::open(build_fixture(tmp.path())).unwrap();

        let hits = db.search("apple", 10).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.food.name_normalized.contains("apple")));

        let hits = db.search("chicken", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].food.name, "Chicken Breast");
        assert_eq!(hits[0].food.protein_g, Some(31.0));
        assert_eq!(hits[0].food.calories_kcal, Some(165.0));
    }

    #[test]
    fn test_search_quotes_operator_input() {
        let tmp = tempfile::tempdir().unwrap();
        let db = CatalogDb::open(build_fixture(tmp.path())).unwrap();

        // FTS5 operators in user input are quoted down to plain terms
        let hits = db.search("apple AND NOT", 10).unwrap();
        assert!(hits.len() >= 2);

        let hits = db.search("   ", 10).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_lookup_prefix_normalizes_and_orders() {
        let tmp = tempfile::tempdir().unwrap();
        let db = CatalogDb::open(build_fixture(tmp.path())).unwrap();

        let hits = db.lookup_prefix("  Apple", 10).unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.food.name_normalized.as_str()).collect();
        assert_eq!(names, vec!["apple", "apple pie"]);

        let hits = db.lookup_prefix("zz", 10).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_lookup_prefix_escapes_like_wildcards() {
        let tmp = tempfile::tempdir().unwrap();
        let db = CatalogDb::open(build_fixture(tmp.path())).unwrap();

        // '%' must not match everything
        let hits = db.lookup_prefix("%", 10).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        let db = CatalogDb::open(build_fixture(tmp.path())).unwrap();

        let first = db.get(1).unwrap().expect("id 1 exists");
        assert_eq!(first.id, 1);
        assert_eq!(first.food.name, "Apple");

        assert!(db.get(9999).unwrap().is_none());
    }

    #[test]
    fn test_absent_nutrient_reads_back_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let db = CatalogDb::open(build_fixture(tmp.path())).unwrap();

        let hits = db.lookup_prefix("apple pie", 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].food.vitamin_b11_mg, None);
        assert_eq!(hits[0].food.sodium_mg, Some(201.0));
    }
}
