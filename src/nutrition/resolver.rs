use tracing::{debug, trace};

use super::catalog::{Catalog, Loggable};
use super::profile::{scale, NutritionResult};
use super::units::resolve_grams;
use crate::meals::MealItemSource;

/// Unit under which a recipe quantity counts portions.
pub const PORTION_UNIT: &str = "portion";

/// Resolves nutrition for foods, recipes and meals over a [`Catalog`].
///
/// Every method is total: unknown ids, empty recipes and empty meals all
/// resolve to [`NutritionResult::zero`].
pub struct Resolver<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: Catalog + ?Sized> Resolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    pub fn food_nutrition(&self, food_id: i64, quantity: f64, unit_name: &str) -> NutritionResult {
        let Some(food) = self.catalog.food(food_id) else {
            return NutritionResult::zero();
        };
        let grams = resolve_grams(Some(food), quantity, unit_name);
        scale(&food.per_100g, grams)
    }

    /// Nutrition of `quantity` portions of a recipe.
    ///
    /// `unit_name` does not take part in the computation: the quantity is
    /// always a portion multiplier.
    pub fn recipe_nutrition(
        &self,
        recipe_id: i64,
        quantity: f64,
        unit_name: &str,
    ) -> NutritionResult {
        let Some(recipe) = self.catalog.recipe(recipe_id) else {
            return NutritionResult::zero();
        };
        if recipe.ingredients.is_empty() || recipe.portions_yield <= 0 {
            return NutritionResult::zero();
        }
        if !unit_name.eq_ignore_ascii_case(PORTION_UNIT) {
            debug!(
                recipe_id,
                unit = unit_name,
                "recipe unit ignored; quantity taken as portions"
            );
        }

        let batch: NutritionResult = recipe
            .ingredients
            .iter()
            .map(|ing| self.food_nutrition(ing.food_id, ing.quantity, &ing.unit_name))
            .sum();

        let portions = recipe.portions_yield as f64;
        let weight_per_portion = batch.weight_grams / portions;
        let target_grams = weight_per_portion * quantity;
        if target_grams <= 0.0 {
            return NutritionResult::zero();
        }

        let ratio = target_grams / weight_per_portion;
        trace!(recipe_id, batch_grams = batch.weight_grams, target_grams, "recipe resolved");
        NutritionResult {
            weight_grams: target_grams,
            ..batch.scaled(1.0 / portions).scaled(ratio)
        }
    }

    /// Sum of the meal's items at their stored quantities.
    pub fn meal_nutrition(&self, meal_id: i64) -> NutritionResult {
        let Some(meal) = self.catalog.meal(meal_id) else {
            return NutritionResult::zero();
        };
        meal.items
            .iter()
            .map(|item| match item.source {
                MealItemSource::Food(food_id) => {
                    self.food_nutrition(food_id, item.quantity, &item.unit_name)
                }
                MealItemSource::Recipe(recipe_id) => {
                    self.recipe_nutrition(recipe_id, item.quantity, &item.unit_name)
                }
            })
            .sum()
    }

    /// Dispatch on the loggable kind. Meals ignore `quantity` and `unit_name`.
    pub fn nutrition(&self, loggable: Loggable, quantity: f64, unit_name: &str) -> NutritionResult {
        match loggable {
            Loggable::Food(id) => self.food_nutrition(id, quantity, unit_name),
            Loggable::Recipe(id) => self.recipe_nutrition(id, quantity, unit_name),
            Loggable::Meal(id) => self.meal_nutrition(id),
        }
    }

    /// Nutrition of `grams` of a loggable, using its current composition.
    ///
    /// The entity is resolved at its natural size (100 g of a food, one
    /// portion of a recipe, a whole meal) and rescaled to `grams`.
    pub fn nutrition_for_grams(&self, loggable: Loggable, grams: f64) -> NutritionResult {
        let natural = match loggable {
            Loggable::Food(id) => self.food_nutrition(id, 100.0, "g"),
            Loggable::Recipe(id) => self.recipe_nutrition(id, 1.0, PORTION_UNIT),
            Loggable::Meal(id) => self.meal_nutrition(id),
        };
        natural.rescaled_to(grams)
    }
}
