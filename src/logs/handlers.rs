use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{CreateLogRequest, DailySummary, DateQuery};
use super::repo_types::DailyLogEntry;
use super::services;
use crate::error::AppResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/logs", get(list_logs).post(create_log))
        .route("/logs/summary", get(daily_summary))
}

#[instrument(skip(state, body))]
pub async fn create_log(
    State(state): State<AppState>,
    Json(body): Json<CreateLogRequest>,
) -> AppResult<(StatusCode, Json<DailyLogEntry>)> {
    let entry = services::log_consumption(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    Query(q): Query<DateQuery>,
) -> AppResult<Json<Vec<DailyLogEntry>>> {
    Ok(Json(services::logs_for_date(&state.db, q.date).await?))
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    Query(q): Query<DateQuery>,
) -> AppResult<Json<DailySummary>> {
    let goal = state.config.daily_calorie_goal;
    Ok(Json(services::daily_summary(&state.db, q.date, goal).await?))
}
