use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;
use crate::features::profile::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/businesses/{id}", get(handlers::profile_page))
        .route("/businesses/{id}/favorite", post(handlers::toggle_favorite))
}
