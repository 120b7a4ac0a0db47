use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::goals;
use crate::state::AppState;

use super::dto::{CommonFood, CreateFoodRequest, DailySummary, FoodLog};
use super::presets::COMMON_FOODS;
use super::repo::{self, FoodItem};
use super::summary::summarize;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods))
        .route("/foods/common", get(list_common_foods))
        .route("/summary", get(daily_summary))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", post(create_food))
        .route("/foods/:id", delete(delete_food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
) -> Result<Json<FoodLog>, (StatusCode, String)> {
    let foods = repo::load(state.store.as_ref()).await.map_err(internal)?;
    Ok(Json(FoodLog::group(foods)))
}

pub async fn list_common_foods() -> Json<&'static [CommonFood]> {
    Json(COMMON_FOODS)
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    Json(body): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<FoodItem>), (StatusCode, String)> {
    if body.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".into()));
    }

    let item = FoodItem {
        id: Uuid::new_v4(),
        name: body.name,
        calories: body.calories,
        protein: body.protein,
        carbs: body.carbs,
        fat: body.fat,
        meal: body.meal,
        time: capture_time(),
    };

    let _guard = state.log_lock.lock().await;
    let mut foods = repo::load(state.store.as_ref()).await.map_err(internal)?;
    foods.push(item.clone());
    repo::save(state.store.as_ref(), &foods)
        .await
        .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let _guard = state.log_lock.lock().await;
    let mut foods = repo::load(state.store.as_ref()).await.map_err(internal)?;
    let before = foods.len();
    foods.retain(|f| f.id != id);
    if foods.len() == before {
        return Err((StatusCode::NOT_FOUND, "Food entry not found".into()));
    }
    repo::save(state.store.as_ref(), &foods)
        .await
        .map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
) -> Result<Json<DailySummary>, (StatusCode, String)> {
    let goals = goals::repo::load(state.store.as_ref())
        .await
        .map_err(internal)?;
    let foods = repo::load(state.store.as_ref()).await.map_err(internal)?;
    Ok(Json(summarize(&goals, &foods)))
}

fn capture_time() -> String {
    let fmt = format_description!("[hour]:[minute]");
    OffsetDateTime::now_utc()
        .format(&fmt)
        .unwrap_or_else(|_| "00:00".into())
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "food log handler failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod food_handler_tests {
    use super::*;
    use crate::foods::repo::MealKind;

    fn request(name: &str, calories: f64, meal: MealKind) -> CreateFoodRequest {
        CreateFoodRequest {
            name: name.into(),
            calories,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            meal,
        }
    }

    #[tokio::test]
    async fn create_list_and_delete() {
        let state = AppState::fake();

        let (status, Json(item)) = create_food(
            State(state.clone()),
            Json(request("Frango grelhado (100g)", 165.0, MealKind::Lunch)),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item.time.len(), 5); // HH:MM

        create_food(
            State(state.clone()),
            Json(request("Ovo cozido (1 unidade)", 78.0, MealKind::Breakfast)),
        )
        .await
        .unwrap();

        let Json(log) = list_foods(State(state.clone())).await.unwrap();
        assert_eq!(log.lunch.len(), 1);
        assert_eq!(log.breakfast.len(), 1);
        assert!(log.dinner.is_empty());

        let status = delete_food(State(state.clone()), Path(item.id)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(log) = list_foods(State(state)).await.unwrap();
        assert!(log.lunch.is_empty());
        assert_eq!(log.breakfast.len(), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_id_is_not_found() {
        let state = AppState::fake();
        let err = delete_food(State(state), Path(Uuid::new_v4())).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let state = AppState::fake();
        let err = create_food(
            State(state),
            Json(request("   ", 100.0, MealKind::Snack)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn summary_reflects_logged_foods() {
        let state = AppState::fake();
        create_food(
            State(state.clone()),
            Json(request("Pastel de nata (1 unidade)", 200.0, MealKind::Snack)),
        )
        .await
        .unwrap();

        let Json(summary) = daily_summary(State(state)).await.unwrap();
        assert_eq!(summary.calories.goal, 2000);
        assert_eq!(summary.calories.consumed, 200.0);
        assert_eq!(summary.calories.remaining, 1800.0);
        assert_eq!(summary.calories.percent, 10.0);
    }

    #[test]
    fn preset_list_is_nonempty_and_fractional() {
        assert_eq!(COMMON_FOODS.len(), 12);
        assert!(COMMON_FOODS.iter().any(|f| f.protein.fract() != 0.0));
    }
}
