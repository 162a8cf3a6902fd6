use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;
use crate::features::dashboard::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/business-owner-dashboard", get(handlers::dashboard_page))
        .route("/my-businesses", get(handlers::my_businesses_page))
        .route(
            "/businesses/new",
            get(handlers::new_business_page).post(handlers::create_business),
        )
        .route(
            "/businesses/{id}/edit",
            get(handlers::edit_business_page).post(handlers::update_business),
        )
        .route("/businesses/{id}/delete", post(handlers::delete_business))
}
