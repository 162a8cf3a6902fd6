use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::home::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home_page))
        .route("/home", get(handlers::home_page))
}
