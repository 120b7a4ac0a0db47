mod dto;
pub mod handlers;
mod presets;
pub mod repo;
mod summary;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
