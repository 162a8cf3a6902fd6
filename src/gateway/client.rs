use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use crate::core::config::BackendConfig;
use crate::features::session::SessionStore;
use crate::gateway::envelope::Envelope;
use crate::gateway::GatewayError;
use crate::shared::types::AuthTokens;

/// Typed gateway to the LOCAFY REST backend.
///
/// Every request is decorated with the visitor's bearer token when one is
/// stored. A 401 triggers exactly one refresh-and-retry per original
/// request; a failed refresh purges the visitor's session and surfaces as
/// [`GatewayError::SessionExpired`]. Concurrent 401s are NOT coalesced:
/// each in-flight request performs its own refresh call.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    sessions: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &BackendConfig, sessions: Arc<SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: config.api_base_url.clone(),
            sessions,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request on behalf of a visitor session and resolve the
    /// response envelope.
    pub(crate) async fn execute(
        &self,
        sid: Uuid,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Envelope, GatewayError> {
        let response = self
            .send_once(sid, method.clone(), path, query, body)
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::resolve(response).await;
        }

        // One retry per original request. Without a refresh token the
        // original 401 stands as-is.
        let Some(refresh_token) = self.sessions.refresh_token(sid).await else {
            return Self::resolve_failure(response).await;
        };

        match self.refresh_access_token(sid, &refresh_token).await {
            Ok(()) => {
                tracing::debug!("Retrying {} {} after token refresh", method, path);
                let retried = self.send_once(sid, method, path, query, body).await?;
                Self::resolve(retried).await
            }
            Err(e) => {
                tracing::info!("Token refresh failed, purging session: {}", e);
                self.sessions.clear(sid).await;
                Err(GatewayError::SessionExpired)
            }
        }
    }

    async fn send_once(
        &self,
        sid: Uuid,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.sessions.access_token(sid).await {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(GatewayError::from)
    }

    /// Exchange the refresh token for a new access token and store it.
    /// This call is never itself retried.
    async fn refresh_access_token(
        &self,
        sid: Uuid,
        refresh_token: &str,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/auth/v1/refresh-token", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(GatewayError::Rejected {
                status,
                message: format!("Refresh rejected: HTTP {}", status),
            });
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        let tokens: RefreshedTokens = envelope.into_data()?;
        self.sessions
            .set_access_token(sid, tokens.tokens.access_token)
            .await;
        Ok(())
    }

    async fn resolve(response: reqwest::Response) -> Result<Envelope, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| GatewayError::Decode(e.to_string()));
        }
        Self::fail_with_status(status, response).await
    }

    async fn resolve_failure(response: reqwest::Response) -> Result<Envelope, GatewayError> {
        let status = response.status();
        Self::fail_with_status(status, response).await
    }

    async fn fail_with_status(
        status: StatusCode,
        response: reqwest::Response,
    ) -> Result<Envelope, GatewayError> {
        // Error bodies usually still carry the envelope with a message.
        let message = match response.json::<Envelope>().await {
            Ok(envelope) => envelope.message_or_generic(),
            Err(_) => format!("Backend returned HTTP {}", status.as_u16()),
        };
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(message));
        }
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct RefreshedTokens {
    tokens: AuthTokens,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::session::storage::MemorySessionStorage;
    use crate::shared::types::{Role, User};
    use axum::extract::State;
    use axum::http::HeaderMap;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Clone)]
    struct StubState {
        refresh_calls: Arc<AtomicUsize>,
        seen_auth_headers: Arc<tokio::sync::Mutex<Vec<Option<String>>>>,
        refresh_succeeds: bool,
        refresh_delay: Duration,
    }

    async fn protected(
        State(state): State<StubState>,
        headers: HeaderMap,
    ) -> (axum::http::StatusCode, Json<serde_json::Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        state.seen_auth_headers.lock().await.push(auth.clone());
        if auth.as_deref() == Some("Bearer fresh-token") {
            (
                axum::http::StatusCode::OK,
                Json(serde_json::json!({"success": true, "data": {"count": 9}})),
            )
        } else {
            (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"success": false, "message": "Token expired"})),
            )
        }
    }

    async fn refresh(
        State(state): State<StubState>,
    ) -> (axum::http::StatusCode, Json<serde_json::Value>) {
        state.refresh_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(state.refresh_delay).await;
        if state.refresh_succeeds {
            (
                axum::http::StatusCode::OK,
                Json(serde_json::json!({
                    "status": "success",
                    "data": {"tokens": {
                        "accessToken": "fresh-token",
                        "refreshToken": "rt-1"
                    }}
                })),
            )
        } else {
            (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"status": "error", "message": "Refresh token expired"})),
            )
        }
    }

    async fn start_stub(refresh_succeeds: bool) -> (String, StubState) {
        start_stub_with_delay(refresh_succeeds, Duration::ZERO).await
    }

    async fn start_stub_with_delay(
        refresh_succeeds: bool,
        refresh_delay: Duration,
    ) -> (String, StubState) {
        let state = StubState {
            refresh_calls: Arc::new(AtomicUsize::new(0)),
            seen_auth_headers: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            refresh_succeeds,
            refresh_delay,
        };
        let app = Router::new()
            .route("/api/protected", get(protected))
            .route("/api/auth/v1/refresh-token", post(refresh))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/api", addr), state)
    }

    fn test_user() -> User {
        User {
            id: "u-1".into(),
            email: "ana@locafy.ph".into(),
            name: "Ana".into(),
            role: Role::Customer,
            image: None,
            email_verified: None,
            created_at: None,
        }
    }

    async fn client_with_session(base_url: String) -> (ApiClient, Arc<SessionStore>, Uuid) {
        let sessions = Arc::new(
            SessionStore::restore(Arc::new(MemorySessionStorage))
                .await
                .unwrap(),
        );
        let sid = Uuid::new_v4();
        sessions
            .set_auth_data(
                sid,
                &AuthTokens {
                    access_token: "stale-token".into(),
                    refresh_token: "rt-1".into(),
                    expires_in: None,
                    refresh_expires_in: None,
                },
                &test_user(),
            )
            .await;
        let config = BackendConfig {
            api_base_url: base_url,
            request_timeout: Duration::from_secs(5),
        };
        (ApiClient::new(&config, sessions.clone()), sessions, sid)
    }

    #[tokio::test]
    async fn test_401_refreshes_once_and_retries() {
        let (base_url, state) = start_stub(true).await;
        let (client, sessions, sid) = client_with_session(base_url).await;

        let envelope = client
            .execute(sid, Method::GET, "/protected", &[], None)
            .await
            .unwrap();
        assert!(envelope.is_success());
        assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
        // The refreshed token replaced the stale one in the session
        assert_eq!(
            sessions.access_token(sid).await.as_deref(),
            Some("fresh-token")
        );
        // First attempt stale, retry fresh
        let seen = state.seen_auth_headers.lock().await;
        assert_eq!(
            *seen,
            vec![
                Some("Bearer stale-token".to_string()),
                Some("Bearer fresh-token".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_purges_session() {
        let (base_url, state) = start_stub(false).await;
        let (client, sessions, sid) = client_with_session(base_url).await;

        let err = client
            .execute(sid, Method::GET, "/protected", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::SessionExpired));
        assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
        assert!(sessions.access_token(sid).await.is_none());
        assert!(sessions.current_user(sid).await.is_none());
    }

    #[tokio::test]
    async fn test_parallel_401s_are_not_coalesced() {
        // The refresh endpoint answers slowly, so both requests hit their
        // 401 before either refresh lands.
        let (base_url, state) =
            start_stub_with_delay(true, Duration::from_millis(300)).await;
        let (client, _sessions, sid) = client_with_session(base_url).await;
        let client = Arc::new(client);

        let a = {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client.execute(sid, Method::GET, "/protected", &[], None).await
            })
        };
        let b = {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client.execute(sid, Method::GET, "/protected", &[], None).await
            })
        };
        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(a.is_ok() && b.is_ok());
        // No single-flight guarantee: each request refreshed on its own.
        assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_token_attached_after_logout() {
        let (base_url, state) = start_stub(true).await;
        let (client, sessions, sid) = client_with_session(base_url).await;

        sessions.clear(sid).await;
        let err = client
            .execute(sid, Method::GET, "/protected", &[], None)
            .await
            .unwrap_err();
        // No refresh token left, so the original 401 stands
        assert!(matches!(err, GatewayError::Rejected { status: 401, .. }));
        assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);

        let seen = state.seen_auth_headers.lock().await;
        assert_eq!(*seen, vec![None]);
    }

    #[tokio::test]
    async fn test_404_maps_to_not_found() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(
            "/api/businesses/{id}",
            get(|| async {
                (
                    axum::http::StatusCode::NOT_FOUND,
                    Json(serde_json::json!({"success": false, "message": "Business not found"})),
                )
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let (client, _sessions, sid) =
            client_with_session(format!("http://{}/api", addr)).await;
        let err = client
            .execute(sid, Method::GET, "/businesses/99", &[], None)
            .await
            .unwrap_err();
        match err {
            GatewayError::NotFound(msg) => assert_eq!(msg, "Business not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
