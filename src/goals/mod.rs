pub mod calc;
pub mod handlers;
pub mod repo;

pub use calc::compute_daily_goals;
pub use repo::DailyGoals;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
