use serde::Deserialize;

use crate::nutrition::PORTION_UNIT;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub portions_yield: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddIngredientRequest {
    pub food_id: i64,
    pub quantity: f64,
    pub unit_name: String,
}

/// Portions of a recipe; the unit is accepted but only portions are supported.
#[derive(Debug, Deserialize)]
pub struct RecipeNutritionQuery {
    #[serde(default = "one_portion")]
    pub quantity: f64,
    #[serde(default = "portion_unit")]
    pub unit: String,
}

fn one_portion() -> f64 {
    1.0
}

fn portion_unit() -> String {
    PORTION_UNIT.into()
}
