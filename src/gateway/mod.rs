//! Typed gateway to the LOCAFY REST backend. One method per backend
//! operation, grouped by resource; all of them share the bearer-token
//! and refresh-on-401 plumbing in [`client`].

pub mod admin;
pub mod auth;
pub mod businesses;
pub mod client;
pub mod discussions;
pub mod envelope;
pub mod favorites;

pub use client::ApiClient;
pub use envelope::{Envelope, Outcome};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered with an error envelope or a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The one-shot token refresh failed; the session has been purged.
    #[error("Session expired")]
    SessionExpired,
}

impl GatewayError {
    /// The human-readable message to surface inline on a page.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected { message, .. } | GatewayError::NotFound(message) => {
                message.clone()
            }
            GatewayError::SessionExpired => "Your session has expired".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
