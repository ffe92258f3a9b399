use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{AddIngredientRequest, CreateRecipeRequest, RecipeNutritionQuery};
use super::repo_types::{Recipe, RecipeIngredient};
use super::services;
use crate::error::AppResult;
use crate::nutrition::NutritionResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/:id", get(get_recipe).delete(deactivate_recipe))
        .route("/recipes/:id/ingredients", post(add_ingredient))
        .route("/recipes/:id/nutrition", get(recipe_nutrition))
}

#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(body): Json<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    let recipe = services::create_recipe(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(services::list_active_recipes(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(services::get_recipe(&state.db, id).await?))
}

#[instrument(skip(state))]
pub async fn deactivate_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    services::deactivate_recipe(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body))]
pub async fn add_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AddIngredientRequest>,
) -> AppResult<(StatusCode, Json<RecipeIngredient>)> {
    let ingredient = services::add_ingredient(&state.db, id, body).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

#[instrument(skip(state))]
pub async fn recipe_nutrition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(q): Query<RecipeNutritionQuery>,
) -> AppResult<Json<NutritionResult>> {
    let result = services::recipe_nutrition(&state.db, id, q.quantity, &q.unit).await?;
    Ok(Json(result))
}
