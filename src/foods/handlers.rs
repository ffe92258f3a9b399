use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use super::dto::{CreateFoodRequest, FoodNutritionQuery, UnitRequest};
use super::repo_types::{Food, FoodUnit};
use super::services;
use crate::error::AppResult;
use crate::nutrition::NutritionResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:id", get(get_food).delete(deactivate_food))
        .route("/foods/:id/units", put(add_unit))
        .route("/foods/:id/nutrition", get(food_nutrition))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    Json(body): Json<CreateFoodRequest>,
) -> AppResult<(StatusCode, Json<Food>)> {
    let food = services::create_food(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(food)))
}

#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> AppResult<Json<Vec<Food>>> {
    Ok(Json(services::list_active_foods(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_food(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Food>> {
    Ok(Json(services::get_food(&state.db, id).await?))
}

#[instrument(skip(state))]
pub async fn deactivate_food(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    services::deactivate_food(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body))]
pub async fn add_unit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UnitRequest>,
) -> AppResult<Json<FoodUnit>> {
    Ok(Json(services::add_unit(&state.db, id, body).await?))
}

#[instrument(skip(state))]
pub async fn food_nutrition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(q): Query<FoodNutritionQuery>,
) -> AppResult<Json<NutritionResult>> {
    let result = services::food_nutrition(&state.db, id, q.quantity, &q.unit).await?;
    Ok(Json(result))
}
