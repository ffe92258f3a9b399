use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub name: String,
    pub portions_yield: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipeIngredient {
    pub id: i64,
    pub recipe_id: i64,
    pub food_id: i64,
    pub quantity: f64,
    pub unit_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub portions_yield: i64,
    pub is_active: bool,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    pub fn from_row(row: RecipeRow, ingredients: Vec<RecipeIngredient>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            portions_yield: row.portions_yield,
            is_active: row.is_active,
            ingredients,
        }
    }
}
