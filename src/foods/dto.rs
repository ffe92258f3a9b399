use serde::{Deserialize, Serialize};

use crate::nutrition::NutrientProfile;

/// Food registration: raw nutrient values for `base_quantity` of `base_unit`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub category: String,
    pub base_unit: String,
    pub base_quantity: f64,
    #[serde(flatten)]
    pub nutrients: NutrientProfile,
    /// Extra unit registered in the same transaction as the food.
    #[serde(default)]
    pub serving_unit: Option<UnitRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRequest {
    pub unit_name: String,
    pub grams: f64,
}

#[derive(Debug, Deserialize)]
pub struct FoodNutritionQuery {
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_quantity() -> f64 {
    100.0
}
fn default_unit() -> String {
    "g".into()
}
