use axum::{routing::post, Router};

use crate::core::state::AppState;
use crate::features::discussions::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/businesses/{id}/discussions", post(handlers::post_discussion))
        .route(
            "/businesses/{id}/discussions/{parent}/replies",
            post(handlers::post_reply),
        )
        .route(
            "/businesses/{id}/discussions/{node}/reply-form",
            post(handlers::open_reply_form),
        )
        .route(
            "/businesses/{id}/reply-form/cancel",
            post(handlers::cancel_reply_form),
        )
        .route(
            "/businesses/{id}/discussions/{node}/toggle",
            post(handlers::toggle_replies),
        )
}
