//! Visitor identity plumbing. Every request gets an opaque session id
//! from the `sid` cookie; the extractors below resolve that id against
//! the [`SessionStore`] and enforce roles on protected pages.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::core::error::AppError;
use crate::core::state::AppState;
use crate::shared::types::{Role, User};

/// The visitor's opaque session id, minted on first contact.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

/// Assigns a session id to every request. A valid `sid` cookie is
/// reused; otherwise a fresh id is minted and set on the response.
pub async fn session_middleware(
    State(cookie_name): State<Arc<String>>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = cookie_value(req.headers(), &cookie_name)
        .and_then(|raw| Uuid::parse_str(&raw).ok());
    let sid = existing.unwrap_or_else(Uuid::now_v7);
    req.extensions_mut().insert(SessionId(sid));

    let mut response = next.run(req).await;

    if existing.is_none() {
        let cookie = format!("{cookie_name}={sid}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionId>()
            .copied()
            .ok_or_else(|| AppError::Internal("Session middleware not installed".to_string()))
    }
}

/// The logged-in user, if any. Pages that render differently for
/// guests extract this instead of a guard.
pub struct CurrentUser(pub Option<User>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionId(sid) = SessionId::from_request_parts(parts, state).await?;
        Ok(CurrentUser(state.sessions.current_user(sid).await))
    }
}

/// Guard for pages that require a logged-in user of any role. Guests
/// are sent to the login page.
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionId(sid) = SessionId::from_request_parts(parts, state).await?;
        state
            .sessions
            .current_user(sid)
            .await
            .map(RequireUser)
            .ok_or(AppError::SessionExpired)
    }
}

/// Guard for the business owner dashboard. Admins pass as well.
pub struct RequireVendor(pub User);

impl FromRequestParts<AppState> for RequireVendor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;
        if user.role != Role::Vendor && user.role != Role::Admin {
            return Err(AppError::Forbidden(
                "Business owner access required".to_string(),
            ));
        }
        Ok(RequireVendor(user))
    }
}

/// Guard for admin pages.
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn test_cookie_value_finds_named_cookie() {
        let headers = headers_with_cookie("theme=dark; sid=0198c5a2-0000-7000-8000-000000000000");
        assert_eq!(
            cookie_value(&headers, "sid").as_deref(),
            Some("0198c5a2-0000-7000-8000-000000000000")
        );
    }

    #[test]
    fn test_cookie_value_missing() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(cookie_value(&headers, "sid"), None);
        assert_eq!(cookie_value(&HeaderMap::new(), "sid"), None);
    }
}
