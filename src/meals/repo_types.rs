use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct MealRow {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
}

/// `meal_items` row; the schema guarantees exactly one source column is set.
#[derive(Debug, FromRow)]
pub struct MealItemRow {
    pub id: i64,
    pub meal_id: i64,
    pub food_id: Option<i64>,
    pub recipe_id: Option<i64>,
    pub quantity: f64,
    pub unit_name: String,
}

/// What a meal item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum MealItemSource {
    Food(i64),
    Recipe(i64),
}

impl MealItemSource {
    /// Build from the two nullable references, requiring exactly one.
    pub fn from_refs(food_id: Option<i64>, recipe_id: Option<i64>) -> Option<Self> {
        match (food_id, recipe_id) {
            (Some(id), None) => Some(Self::Food(id)),
            (None, Some(id)) => Some(Self::Recipe(id)),
            _ => None,
        }
    }

    pub fn food_id(&self) -> Option<i64> {
        match self {
            Self::Food(id) => Some(*id),
            Self::Recipe(_) => None,
        }
    }

    pub fn recipe_id(&self) -> Option<i64> {
        match self {
            Self::Recipe(id) => Some(*id),
            Self::Food(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub id: i64,
    pub meal_id: i64,
    pub source: MealItemSource,
    pub quantity: f64,
    pub unit_name: String,
}

impl MealItemRow {
    pub fn into_item(self) -> Option<MealItem> {
        let source = MealItemSource::from_refs(self.food_id, self.recipe_id)?;
        Some(MealItem {
            id: self.id,
            meal_id: self.meal_id,
            source,
            quantity: self.quantity,
            unit_name: self.unit_name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub items: Vec<MealItem>,
}

impl Meal {
    pub fn from_row(row: MealRow, items: Vec<MealItem>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            is_active: row.is_active,
            items,
        }
    }
}
