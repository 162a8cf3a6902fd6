use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;
use crate::features::auth_pages::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(handlers::login_page).post(handlers::login_submit))
        .route(
            "/register",
            get(handlers::register_page).post(handlers::register_submit),
        )
        .route("/logout", post(handlers::logout))
        .route("/oauth/callback", get(handlers::oauth_callback))
        .route(
            "/forgot-password",
            get(handlers::forgot_password_page).post(handlers::forgot_password_submit),
        )
        .route(
            "/reset-password",
            get(handlers::reset_password_page).post(handlers::reset_password_submit),
        )
        .route("/verify-email", get(handlers::verify_email_page))
        .route(
            "/resend-verification",
            post(handlers::resend_verification_submit),
        )
}
