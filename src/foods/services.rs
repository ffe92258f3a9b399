use sqlx::SqlitePool;
use tracing::{info, instrument};

use super::dto::{CreateFoodRequest, UnitRequest};
use super::repo;
use super::repo_types::{Food, FoodUnit, NewFood};
use crate::error::{AppError, AppResult};
use crate::nutrition::{loader, units, Loggable, NutritionResult, Resolver};
use crate::validate::{positive, required};

/// Registration units that mark a food as a liquid.
const LIQUID_UNITS: [&str; 2] = ["ml", "l"];

pub fn is_liquid_unit(unit: &str) -> bool {
    LIQUID_UNITS.iter().any(|u| u.eq_ignore_ascii_case(unit))
}

fn validate_unit(unit: &UnitRequest) -> AppResult<(&str, f64)> {
    let name = required("unit_name", &unit.unit_name)?;
    let grams = positive("grams", unit.grams)?;
    Ok((name, grams))
}

/// Register a food, normalizing its nutrients to per-100g.
///
/// A registration unit other than `g`/`ml` becomes a custom unit weighing
/// `base_quantity` grams. The optional serving unit is written in the same
/// transaction, so either everything is stored or nothing is.
#[instrument(skip(db, req), fields(name = %req.name))]
pub async fn create_food(db: &SqlitePool, req: CreateFoodRequest) -> AppResult<Food> {
    let name = required("name", &req.name)?;
    let category = required("category", &req.category)?;
    let base_unit = required("base_unit", &req.base_unit)?;
    let base_quantity = positive("base_quantity", req.base_quantity)?;
    if let Some(field) = req.nutrients.invalid_field() {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    let serving_unit = req.serving_unit.as_ref().map(validate_unit).transpose()?;

    let new_food = NewFood {
        name: name.to_string(),
        category: category.to_string(),
        is_liquid: is_liquid_unit(base_unit),
        per_100g: req.nutrients.per_100g(base_quantity),
    };

    let mut tx = db.begin().await?;
    let row = repo::insert_food(&mut tx, &new_food).await?;
    if !units::is_identity_unit(base_unit) {
        repo::upsert_unit(&mut tx, row.id, base_unit, base_quantity).await?;
    }
    if let Some((unit_name, grams)) = serving_unit {
        repo::upsert_unit(&mut tx, row.id, unit_name, grams).await?;
    }
    let food_units = repo::list_units(&mut tx, row.id).await?;
    tx.commit().await?;

    info!(food_id = row.id, units = food_units.len(), "food created");
    Ok(Food::from_row(row, food_units))
}

/// Add a custom unit to a food, or update the grams of an existing one.
#[instrument(skip(db))]
pub async fn add_unit(db: &SqlitePool, food_id: i64, unit: UnitRequest) -> AppResult<FoodUnit> {
    let (unit_name, grams) = validate_unit(&unit)?;

    let mut tx = db.begin().await?;
    if !repo::food_exists(&mut tx, food_id).await? {
        return Err(AppError::not_found("food", food_id));
    }
    let saved = repo::upsert_unit(&mut tx, food_id, unit_name, grams).await?;
    tx.commit().await?;

    info!(food_id, unit = %saved.unit_name, grams = saved.grams, "food unit saved");
    Ok(saved)
}

#[instrument(skip(db))]
pub async fn get_food(db: &SqlitePool, food_id: i64) -> AppResult<Food> {
    let mut conn = db.acquire().await?;
    repo::find_food(&mut conn, food_id)
        .await?
        .ok_or(AppError::not_found("food", food_id))
}

#[instrument(skip(db))]
pub async fn list_active_foods(db: &SqlitePool) -> AppResult<Vec<Food>> {
    let mut conn = db.acquire().await?;
    Ok(repo::list_active(&mut conn).await?)
}

#[instrument(skip(db))]
pub async fn deactivate_food(db: &SqlitePool, food_id: i64) -> AppResult<()> {
    let mut tx = db.begin().await?;
    if !repo::set_active(&mut tx, food_id, false).await? {
        return Err(AppError::not_found("food", food_id));
    }
    tx.commit().await?;
    info!(food_id, "food deactivated");
    Ok(())
}

/// Nutrition of `quantity` `unit` of a food; zero when the food is unknown.
#[instrument(skip(db))]
pub async fn food_nutrition(
    db: &SqlitePool,
    food_id: i64,
    quantity: f64,
    unit: &str,
) -> AppResult<NutritionResult> {
    let snapshot = loader::snapshot(db, &[Loggable::Food(food_id)]).await?;
    Ok(Resolver::new(&snapshot).food_nutrition(food_id, quantity, unit))
}
