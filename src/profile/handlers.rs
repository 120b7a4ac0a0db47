use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::goals::{self, compute_daily_goals, DailyGoals};
use crate::state::AppState;

use super::repo::{self, UserProfile};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", put(put_profile))
}

#[derive(Debug, Serialize)]
pub struct ProfileSaved {
    pub profile: UserProfile,
    /// Present when the saved profile was complete enough to recompute
    /// daily goals.
    pub recalculated_goals: Option<DailyGoals>,
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    let profile = repo::load(state.store.as_ref()).await.map_err(internal)?;
    Ok(Json(profile))
}

/// Saving overwrites the whole record. When weight, height, activity level
/// and goal are all filled in, the daily goals are recomputed and persisted
/// too, as the original save flow did; an incomplete profile never invokes
/// the calculator.
#[instrument(skip(state, profile))]
pub async fn put_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<ProfileSaved>, (StatusCode, String)> {
    repo::save(state.store.as_ref(), &profile)
        .await
        .map_err(internal)?;

    let recalculated_goals = if is_complete(&profile) {
        match compute_daily_goals(&profile) {
            Ok(new_goals) => {
                goals::repo::save(state.store.as_ref(), &new_goals)
                    .await
                    .map_err(internal)?;
                Some(new_goals)
            }
            Err(e) => {
                debug!(error = %e, "profile saved without goal recalculation");
                None
            }
        }
    } else {
        None
    };

    Ok(Json(ProfileSaved {
        profile,
        recalculated_goals,
    }))
}

fn is_complete(profile: &UserProfile) -> bool {
    !profile.current_weight.is_empty()
        && !profile.height.is_empty()
        && !profile.activity_level.is_empty()
        && !profile.goal.is_empty()
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "profile handler failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[cfg(test)]
mod profile_handler_tests {
    use super::*;

    fn complete_profile() -> UserProfile {
        UserProfile {
            name: "Joana".into(),
            height: "175".into(),
            current_weight: "70".into(),
            activity_level: "moderate".into(),
            goal: "lose".into(),
            ..UserProfile::default()
        }
    }

    #[tokio::test]
    async fn saving_complete_profile_recomputes_goals() {
        let state = AppState::fake();

        let Json(saved) = put_profile(State(state.clone()), Json(complete_profile()))
            .await
            .unwrap();
        let new_goals = saved.recalculated_goals.expect("goals recalculated");
        assert_eq!(new_goals.calories, 2094);

        // Recomputed goals were persisted, not just returned.
        let stored = goals::repo::load(state.store.as_ref()).await.unwrap();
        assert_eq!(stored, new_goals);
    }

    #[tokio::test]
    async fn incomplete_profile_saves_without_touching_goals() {
        let state = AppState::fake();

        let mut profile = complete_profile();
        profile.goal = String::new();
        let Json(saved) = put_profile(State(state.clone()), Json(profile.clone()))
            .await
            .unwrap();
        assert!(saved.recalculated_goals.is_none());

        let Json(loaded) = get_profile(State(state.clone())).await.unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(
            goals::repo::load(state.store.as_ref()).await.unwrap(),
            DailyGoals::default()
        );
    }

    #[tokio::test]
    async fn non_numeric_fields_gate_the_calculator() {
        let state = AppState::fake();

        let mut profile = complete_profile();
        profile.current_weight = "seventy".into();
        let Json(saved) = put_profile(State(state.clone()), Json(profile)).await.unwrap();
        assert!(saved.recalculated_goals.is_none());
        assert_eq!(
            goals::repo::load(state.store.as_ref()).await.unwrap(),
            DailyGoals::default()
        );
    }
}
