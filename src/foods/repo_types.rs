use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::nutrition::NutrientProfile;

/// Flat `foods` row as stored.
#[derive(Debug, FromRow)]
pub struct FoodRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub is_liquid: bool,
    pub is_active: bool,
    pub calories_100g: f64,
    pub proteins_100g: f64,
    pub carbs_100g: f64,
    pub fats_100g: f64,
    pub saturated_fats_100g: Option<f64>,
    pub trans_fats_100g: Option<f64>,
    pub fiber_100g: Option<f64>,
    pub sodium_100g: Option<f64>,
    pub sugar_100g: Option<f64>,
}

/// Uniqueness key of a unit name: trimmed, Unicode-lowercased.
pub fn unit_key(unit_name: &str) -> String {
    unit_name.trim().to_lowercase()
}

/// A named unit of a food and the grams one of it weighs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FoodUnit {
    pub id: i64,
    pub food_id: i64,
    pub unit_name: String,
    pub grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub is_liquid: bool,
    pub is_active: bool,
    pub per_100g: NutrientProfile,
    pub units: Vec<FoodUnit>,
}

impl Food {
    pub fn from_row(row: FoodRow, units: Vec<FoodUnit>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            is_liquid: row.is_liquid,
            is_active: row.is_active,
            per_100g: NutrientProfile {
                calories: row.calories_100g,
                proteins: row.proteins_100g,
                carbs: row.carbs_100g,
                fats: row.fats_100g,
                saturated_fats: row.saturated_fats_100g,
                trans_fats: row.trans_fats_100g,
                fiber: row.fiber_100g,
                sodium: row.sodium_100g,
                sugar: row.sugar_100g,
            },
            units,
        }
    }

    /// Registered grams for `unit_name`, compared by [`unit_key`].
    pub fn grams_per_unit(&self, unit_name: &str) -> Option<f64> {
        let wanted = unit_key(unit_name);
        self.units
            .iter()
            .find(|u| unit_key(&u.unit_name) == wanted)
            .map(|u| u.grams)
    }
}

/// Values for a food about to be inserted, already normalized per 100 g.
#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub category: String,
    pub is_liquid: bool,
    pub per_100g: NutrientProfile,
}
