use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;
use crate::features::wishlist::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(handlers::wishlist_page))
        .route("/wishlist/{id}/remove", post(handlers::remove_favorite))
}
