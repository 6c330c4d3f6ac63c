//! Canonical catalog entry types

use serde::{Deserialize, Serialize};

/// One canonical catalog entry, as loaded into the `food` table.
///
/// Every nutrient is a per-100g quantity. `None` means the source recorded no
/// value for the field, which is distinct from an explicit zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Display name, as shown to the user.
    pub name: String,
    /// Lower-cased, trimmed form of the name; stable matching/sort key.
    pub name_normalized: String,

    pub calories_kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub calcium_mg: Option<f64>,
    pub iron_mg: Option<f64>,
    pub vitamin_c_mg: Option<f64>,
    pub vitamin_b11_mg: Option<f64>,
}

impl FoodRecord {
    /// Nutrient values in catalog column order.
    pub fn nutrients(&self) -> [Option<f64>; crate::columns::NUTRIENT_COUNT] {
        [
            self.calories_kcal,
            self.protein_g,
            self.fat_g,
            self.carbs_g,
            self.fiber_g,
            self.sugar_g,
            self.sodium_mg,
            self.calcium_mg,
            self.iron_mg,
            self.vitamin_c_mg,
            self.vitamin_b11_mg,
        ]
    }

    /// Set a nutrient by its position in catalog column order.
    pub fn set_nutrient(&mut self, index: usize, value: Option<f64>) {
        match index {
            0 => self.calories_kcal = value,
            1 => self.protein_g = value,
            2 => self.fat_g = value,
            3 => self.carbs_g = value,
            4 => self.fiber_g = value,
            5 => self.sugar_g = value,
            6 => self.sodium_mg = value,
            7 => self.calcium_mg = value,
            8 => self.iron_mg = value,
            9 => self.vitamin_c_mg = value,
            10 => self.vitamin_b11_mg = value,
            _ => {}
        }
    }
}
