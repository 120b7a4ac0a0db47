use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{error, instrument};

use crate::state::AppState;

use super::repo::{self, DailyGoals};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(get_goals))
        .route("/goals", put(put_goals))
}

#[instrument(skip(state))]
pub async fn get_goals(
    State(state): State<AppState>,
) -> Result<Json<DailyGoals>, (StatusCode, String)> {
    let goals = repo::load(state.store.as_ref()).await.map_err(internal)?;
    Ok(Json(goals))
}

#[instrument(skip(state))]
pub async fn put_goals(
    State(state): State<AppState>,
    Json(goals): Json<DailyGoals>,
) -> Result<Json<DailyGoals>, (StatusCode, String)> {
    repo::save(state.store.as_ref(), &goals)
        .await
        .map_err(internal)?;
    Ok(Json(goals))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "goals handler failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
