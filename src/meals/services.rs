use sqlx::SqlitePool;
use tracing::{info, instrument};

use super::dto::{AddMealItemRequest, CreateMealRequest};
use super::repo;
use super::repo_types::{Meal, MealItem, MealItemSource};
use crate::error::{AppError, AppResult};
use crate::nutrition::{loader, Loggable, NutritionResult, Resolver};
use crate::validate::{positive, required};
use crate::{foods, recipes};

#[instrument(skip(db, req), fields(name = %req.name))]
pub async fn create_meal(db: &SqlitePool, req: CreateMealRequest) -> AppResult<Meal> {
    let name = required("name", &req.name)?;

    let mut tx = db.begin().await?;
    let row = repo::insert_meal(&mut tx, name).await?;
    tx.commit().await?;

    info!(meal_id = row.id, "meal created");
    Ok(Meal::from_row(row, Vec::new()))
}

/// Append a food or recipe to a meal.
#[instrument(skip(db))]
pub async fn add_item(db: &SqlitePool, meal_id: i64, req: AddMealItemRequest) -> AppResult<MealItem> {
    let source = MealItemSource::from_refs(req.food_id, req.recipe_id).ok_or_else(|| {
        AppError::validation("exactly one of food_id or recipe_id must be set")
    })?;
    let quantity = positive("quantity", req.quantity)?;
    let unit_name = required("unit_name", &req.unit_name)?;

    let mut tx = db.begin().await?;
    if !repo::meal_exists(&mut tx, meal_id).await? {
        return Err(AppError::not_found("meal", meal_id));
    }
    match source {
        MealItemSource::Food(id) => {
            if !foods::repo::food_exists(&mut tx, id).await? {
                return Err(AppError::not_found("food", id));
            }
        }
        MealItemSource::Recipe(id) => {
            if !recipes::repo::recipe_exists(&mut tx, id).await? {
                return Err(AppError::not_found("recipe", id));
            }
        }
    }
    let row = repo::insert_item(&mut tx, meal_id, source, quantity, unit_name).await?;
    tx.commit().await?;

    info!(meal_id, item_id = row.id, "meal item added");
    Ok(MealItem {
        id: row.id,
        meal_id,
        source,
        quantity: row.quantity,
        unit_name: row.unit_name,
    })
}

#[instrument(skip(db))]
pub async fn get_meal(db: &SqlitePool, meal_id: i64) -> AppResult<Meal> {
    let mut conn = db.acquire().await?;
    repo::find_meal(&mut conn, meal_id)
        .await?
        .ok_or(AppError::not_found("meal", meal_id))
}

#[instrument(skip(db))]
pub async fn list_active_meals(db: &SqlitePool) -> AppResult<Vec<Meal>> {
    let mut conn = db.acquire().await?;
    Ok(repo::list_active(&mut conn).await?)
}

#[instrument(skip(db))]
pub async fn deactivate_meal(db: &SqlitePool, meal_id: i64) -> AppResult<()> {
    let mut tx = db.begin().await?;
    if !repo::set_active(&mut tx, meal_id, false).await? {
        return Err(AppError::not_found("meal", meal_id));
    }
    tx.commit().await?;
    info!(meal_id, "meal deactivated");
    Ok(())
}

/// Whole-meal nutrition: the sum of every item.
#[instrument(skip(db))]
pub async fn meal_nutrition(db: &SqlitePool, meal_id: i64) -> AppResult<NutritionResult> {
    let snapshot = loader::snapshot(db, &[Loggable::Meal(meal_id)]).await?;
    Ok(Resolver::new(&snapshot).meal_nutrition(meal_id))
}
