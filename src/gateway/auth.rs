//! Authentication endpoints under `/auth/v1`.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::gateway::envelope::Outcome;
use crate::gateway::{ApiClient, GatewayError};
use crate::shared::types::{AuthTokens, User};

/// The payload of a successful login, signup or OAuth exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    pub tokens: AuthTokens,
    pub user: User,
}

impl ApiClient {
    pub async fn signup(
        &self,
        sid: Uuid,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<String>, GatewayError> {
        let body = json!({"name": name, "email": email, "password": password});
        self.execute(sid, Method::POST, "/auth/v1/signup", &[], Some(&body))
            .await?
            .into_ack()
    }

    pub async fn login(
        &self,
        sid: Uuid,
        email: &str,
        password: &str,
    ) -> Result<AuthData, GatewayError> {
        let body = json!({"email": email, "password": password});
        self.execute(sid, Method::POST, "/auth/v1/login", &[], Some(&body))
            .await?
            .into_data()
    }

    pub async fn verify_email(
        &self,
        sid: Uuid,
        token: &str,
    ) -> Result<Option<String>, GatewayError> {
        self.execute(
            sid,
            Method::GET,
            "/auth/v1/verify-email",
            &[("token", token.to_string())],
            None,
        )
        .await?
        .into_ack()
    }

    pub async fn resend_email_verification(
        &self,
        sid: Uuid,
        email: &str,
    ) -> Result<Option<String>, GatewayError> {
        let body = json!({"email": email});
        self.execute(
            sid,
            Method::POST,
            "/auth/v1/resend-email-verification",
            &[],
            Some(&body),
        )
        .await?
        .into_ack()
    }

    pub async fn forgot_password(
        &self,
        sid: Uuid,
        email: &str,
    ) -> Result<Option<String>, GatewayError> {
        let body = json!({"email": email});
        self.execute(sid, Method::POST, "/auth/v1/forgot-password", &[], Some(&body))
            .await?
            .into_ack()
    }

    pub async fn reset_password(
        &self,
        sid: Uuid,
        token: &str,
        password: &str,
    ) -> Result<Option<String>, GatewayError> {
        let body = json!({"token": token, "password": password});
        self.execute(sid, Method::POST, "/auth/v1/reset-password", &[], Some(&body))
            .await?
            .into_ack()
    }

    /// Exchange an OAuth authorization code for tokens. This endpoint is
    /// known to double-wrap its envelope, so it gets the lenient
    /// resolution path.
    pub async fn exchange_oauth_code(
        &self,
        sid: Uuid,
        code: &str,
    ) -> Result<AuthData, GatewayError> {
        let envelope = self
            .execute(
                sid,
                Method::GET,
                "/auth/v1/oauth/exchange",
                &[("code", code.to_string())],
                None,
            )
            .await?;
        match envelope.normalize_oauth() {
            Outcome::Success(value) => {
                serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
            }
            Outcome::Failure(message) => Err(GatewayError::Rejected {
                status: 200,
                message,
            }),
        }
    }
}
