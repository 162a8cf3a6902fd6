use axum::{routing::get, Router};

use crate::core::state::AppState;
use crate::features::listing::handlers;

pub fn routes() -> Router<AppState> {
    Router::new().route("/businesses", get(handlers::listing_page))
}
