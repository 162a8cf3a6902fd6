use std::sync::Arc;

use uuid::Uuid;

use crate::features::session::store::SessionStore;
use crate::gateway::{ApiClient, GatewayError};
use crate::shared::types::User;

/// Session lifecycle on top of the gateway: authenticate against the
/// backend, then establish or tear down the visitor's stored entry.
pub struct SessionService {
    api: Arc<ApiClient>,
    sessions: Arc<SessionStore>,
}

impl SessionService {
    pub fn new(api: Arc<ApiClient>, sessions: Arc<SessionStore>) -> Self {
        Self { api, sessions }
    }

    /// Password login. On success the tokens and user profile are
    /// stored together; nothing is stored on failure.
    pub async fn login(&self, sid: Uuid, email: &str, password: &str) -> Result<User, GatewayError> {
        let data = self.api.login(sid, email, password).await?;
        self.sessions
            .set_auth_data(sid, &data.tokens, &data.user)
            .await;
        Ok(data.user)
    }

    /// Complete the OAuth flow by exchanging the provider code.
    pub async fn complete_oauth(&self, sid: Uuid, code: &str) -> Result<User, GatewayError> {
        let data = self.api.exchange_oauth_code(sid, code).await?;
        self.sessions
            .set_auth_data(sid, &data.tokens, &data.user)
            .await;
        Ok(data.user)
    }

    /// Register a new account. Signup does not log the user in; the
    /// backend sends a verification email first.
    pub async fn signup(
        &self,
        sid: Uuid,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<String>, GatewayError> {
        self.api.signup(sid, name, email, password).await
    }

    pub async fn logout(&self, sid: Uuid) {
        self.sessions.clear(sid).await;
    }
}
