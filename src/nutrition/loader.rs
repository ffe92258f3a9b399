use std::collections::BTreeSet;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::trace;

use super::catalog::{Loggable, Snapshot};
use crate::meals::{self, MealItemSource};
use crate::{foods, recipes};

/// Load every entity reachable from `roots` into a [`Snapshot`].
///
/// Composition is at most meal -> recipe -> food, so meals are expanded
/// first, then recipes, then foods. Roots that do not exist are simply
/// absent from the snapshot.
pub async fn load_snapshot(
    conn: &mut SqliteConnection,
    roots: &[Loggable],
) -> sqlx::Result<Snapshot> {
    let mut food_ids = BTreeSet::new();
    let mut recipe_ids = BTreeSet::new();
    let mut meal_ids = BTreeSet::new();
    for root in roots {
        match *root {
            Loggable::Food(id) => food_ids.insert(id),
            Loggable::Recipe(id) => recipe_ids.insert(id),
            Loggable::Meal(id) => meal_ids.insert(id),
        };
    }

    let mut snapshot = Snapshot::new();

    for meal_id in meal_ids {
        let Some(meal) = meals::repo::find_meal(conn, meal_id).await? else {
            continue;
        };
        for item in &meal.items {
            match item.source {
                MealItemSource::Food(id) => food_ids.insert(id),
                MealItemSource::Recipe(id) => recipe_ids.insert(id),
            };
        }
        snapshot.insert_meal(meal);
    }

    for recipe_id in recipe_ids {
        let Some(recipe) = recipes::repo::find_recipe(conn, recipe_id).await? else {
            continue;
        };
        food_ids.extend(recipe.ingredients.iter().map(|ing| ing.food_id));
        snapshot.insert_recipe(recipe);
    }

    for food_id in food_ids {
        if let Some(food) = foods::repo::find_food(conn, food_id).await? {
            snapshot.insert_food(food);
        }
    }

    trace!(roots = roots.len(), "snapshot loaded");
    Ok(snapshot)
}

/// [`load_snapshot`] inside its own read transaction.
pub async fn snapshot(db: &SqlitePool, roots: &[Loggable]) -> sqlx::Result<Snapshot> {
    let mut tx = db.begin().await?;
    let snapshot = load_snapshot(&mut tx, roots).await?;
    tx.commit().await?;
    Ok(snapshot)
}
