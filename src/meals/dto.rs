use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
}

/// A meal item references a food or a recipe, never both.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMealItemRequest {
    #[serde(default)]
    pub food_id: Option<i64>,
    #[serde(default)]
    pub recipe_id: Option<i64>,
    pub quantity: f64,
    pub unit_name: String,
}
