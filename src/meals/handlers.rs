use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{AddMealItemRequest, CreateMealRequest};
use super::repo_types::{Meal, MealItem};
use super::services;
use crate::error::AppResult;
use crate::nutrition::NutritionResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/:id", get(get_meal).delete(deactivate_meal))
        .route("/meals/:id/items", post(add_item))
        .route("/meals/:id/nutrition", get(meal_nutrition))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    Json(body): Json<CreateMealRequest>,
) -> AppResult<(StatusCode, Json<Meal>)> {
    let meal = services::create_meal(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state))]
pub async fn list_meals(State(state): State<AppState>) -> AppResult<Json<Vec<Meal>>> {
    Ok(Json(services::list_active_meals(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_meal(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Meal>> {
    Ok(Json(services::get_meal(&state.db, id).await?))
}

#[instrument(skip(state))]
pub async fn deactivate_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    services::deactivate_meal(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AddMealItemRequest>,
) -> AppResult<(StatusCode, Json<MealItem>)> {
    let item = services::add_item(&state.db, id, body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state))]
pub async fn meal_nutrition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<NutritionResult>> {
    Ok(Json(services::meal_nutrition(&state.db, id).await?))
}
