use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;
use crate::features::admin::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(handlers::admin_page))
        .route("/admin/users", get(handlers::users_page))
        .route("/admin/users/{id}/role", post(handlers::change_user_role))
        .route("/admin/users/{id}/delete", post(handlers::delete_user))
        .route("/admin/businesses", get(handlers::businesses_page))
        .route("/admin/businesses/{id}/verify", post(handlers::verify_business))
        .route(
            "/admin/businesses/{id}/unverify",
            post(handlers::unverify_business),
        )
        .route(
            "/admin/businesses/{id}/delete",
            post(handlers::delete_business),
        )
}
