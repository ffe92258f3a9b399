use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foods::Food;
use crate::meals::Meal;
use crate::recipes::Recipe;

/// The entity a consumption entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Loggable {
    Food(i64),
    Recipe(i64),
    Meal(i64),
}

/// Discriminant of [`Loggable`], as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggableType {
    Food,
    Recipe,
    Meal,
}

impl Loggable {
    pub fn new(kind: LoggableType, id: i64) -> Self {
        match kind {
            LoggableType::Food => Self::Food(id),
            LoggableType::Recipe => Self::Recipe(id),
            LoggableType::Meal => Self::Meal(id),
        }
    }

    /// Build from three nullable references, requiring exactly one.
    pub fn from_refs(
        food_id: Option<i64>,
        recipe_id: Option<i64>,
        meal_id: Option<i64>,
    ) -> Option<Self> {
        match (food_id, recipe_id, meal_id) {
            (Some(id), None, None) => Some(Self::Food(id)),
            (None, Some(id), None) => Some(Self::Recipe(id)),
            (None, None, Some(id)) => Some(Self::Meal(id)),
            _ => None,
        }
    }

    pub fn kind(&self) -> LoggableType {
        match self {
            Self::Food(_) => LoggableType::Food,
            Self::Recipe(_) => LoggableType::Recipe,
            Self::Meal(_) => LoggableType::Meal,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Food(id) | Self::Recipe(id) | Self::Meal(id) => *id,
        }
    }

    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::Food(_) => "food",
            Self::Recipe(_) => "recipe",
            Self::Meal(_) => "meal",
        }
    }

    pub fn food_id(&self) -> Option<i64> {
        match self {
            Self::Food(id) => Some(*id),
            _ => None,
        }
    }

    pub fn recipe_id(&self) -> Option<i64> {
        match self {
            Self::Recipe(id) => Some(*id),
            _ => None,
        }
    }

    pub fn meal_id(&self) -> Option<i64> {
        match self {
            Self::Meal(id) => Some(*id),
            _ => None,
        }
    }
}

/// Read access to the food/recipe/meal graph the resolver walks.
pub trait Catalog {
    fn food(&self, id: i64) -> Option<&Food>;
    fn recipe(&self, id: i64) -> Option<&Recipe>;
    fn meal(&self, id: i64) -> Option<&Meal>;

    fn contains(&self, loggable: Loggable) -> bool {
        match loggable {
            Loggable::Food(id) => self.food(id).is_some(),
            Loggable::Recipe(id) => self.recipe(id).is_some(),
            Loggable::Meal(id) => self.meal(id).is_some(),
        }
    }

    fn display_name(&self, loggable: Loggable) -> Option<&str> {
        match loggable {
            Loggable::Food(id) => self.food(id).map(|f| f.name.as_str()),
            Loggable::Recipe(id) => self.recipe(id).map(|r| r.name.as_str()),
            Loggable::Meal(id) => self.meal(id).map(|m| m.name.as_str()),
        }
    }
}

/// An in-memory copy of the entities needed to answer one query.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    foods: HashMap<i64, Food>,
    recipes: HashMap<i64, Recipe>,
    meals: HashMap<i64, Meal>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_food(&mut self, food: Food) {
        self.foods.insert(food.id, food);
    }

    pub fn insert_recipe(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.id, recipe);
    }

    pub fn insert_meal(&mut self, meal: Meal) {
        self.meals.insert(meal.id, meal);
    }
}

impl Catalog for Snapshot {
    fn food(&self, id: i64) -> Option<&Food> {
        self.foods.get(&id)
    }

    fn recipe(&self, id: i64) -> Option<&Recipe> {
        self.recipes.get(&id)
    }

    fn meal(&self, id: i64) -> Option<&Meal> {
        self.meals.get(&id)
    }
}
