mod dto;
pub mod handlers;
mod parse;
pub mod vision;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
