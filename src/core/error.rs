use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::shared::templates::{render_page, TemplateError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Backend call failed in a way the page cannot recover from.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Refresh-after-401 failed; the session was purged.
    #[error("Session expired")]
    SessionExpired,

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::SessionExpired => AppError::SessionExpired,
            GatewayError::NotFound(msg) => AppError::NotFound(msg),
            GatewayError::Rejected { message, .. } => AppError::Backend(message),
            other => AppError::Backend(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // A dead session always funnels back to the login entry point.
        if matches!(self, AppError::SessionExpired) {
            return Redirect::to("/login").into_response();
        }

        let (status, message) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(ref msg) | AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Backend(ref msg) => {
                tracing::error!("Backend error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Template(ref e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::SessionExpired => unreachable!(),
        };

        let context = serde_json::json!({
            "status": status.as_u16(),
            "message": message,
        });
        match render_page("error", &context) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
