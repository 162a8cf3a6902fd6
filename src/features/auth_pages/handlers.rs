use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::core::error::Result;
use crate::core::state::AppState;
use crate::features::auth_pages::dtos::{
    first_validation_message, ForgotPasswordForm, LoginForm, RegisterForm, ResendVerificationForm,
    ResetPasswordForm,
};
use crate::features::session::SessionId;
use crate::shared::constants::LOGIN_REDIRECT_DELAY_SECS;
use crate::shared::templates::render_page;
use crate::shared::types::Role;

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub oauth_success: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub error: Option<String>,
}

fn role_from_param(raw: Option<&str>) -> Role {
    match raw {
        Some("ADMIN") => Role::Admin,
        Some("VENDOR") => Role::Vendor,
        _ => Role::Customer,
    }
}

fn login_page_html(error: Option<String>) -> Result<Html<String>> {
    let html = render_page("login", json!({"error": error}))?;
    Ok(Html(html))
}

/// The post-login interstitial: a welcome banner that forwards to the
/// role's landing page after a short delay.
fn login_success_html(name: &str, role: Role) -> Result<Html<String>> {
    let html = render_page(
        "login_success",
        json!({
            "message": format!("Welcome back, {name}! Login successful. Redirecting..."),
            "destination": role.post_login_destination(),
            "delaySecs": LOGIN_REDIRECT_DELAY_SECS,
        }),
    )?;
    Ok(Html(html))
}

/// Login page. Also the landing spot after a completed OAuth
/// exchange, which arrives with `oauth_success` query params.
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Result<Html<String>> {
    if query.oauth_success.as_deref() == Some("true") {
        let name = query.name.as_deref().unwrap_or("User");
        return login_success_html(name, role_from_param(query.role.as_deref()));
    }
    login_page_html(query.error)
}

pub async fn login_submit(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Form(form): Form<LoginForm>,
) -> Result<Html<String>> {
    if let Err(errors) = form.validate() {
        return login_page_html(Some(first_validation_message(&errors)));
    }

    match state.auth.login(sid, &form.email, &form.password).await {
        Ok(user) => login_success_html(&user.name, user.role),
        Err(err) => login_page_html(Some(err.user_message())),
    }
}

pub async fn register_page() -> Result<Html<String>> {
    let html = render_page("register", json!({}))?;
    Ok(Html(html))
}

pub async fn register_submit(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Form(form): Form<RegisterForm>,
) -> Result<Html<String>> {
    // Both checks run before any network call.
    if let Err(errors) = form.validate() {
        let html = render_page(
            "register",
            json!({"error": first_validation_message(&errors)}),
        )?;
        return Ok(Html(html));
    }
    if form.password != form.confirm_password {
        let html = render_page("register", json!({"error": "Passwords do not match"}))?;
        return Ok(Html(html));
    }

    match state
        .auth
        .signup(sid, form.name.trim(), &form.email, &form.password)
        .await
    {
        Ok(message) => {
            let html = render_page(
                "register",
                json!({
                    "registered": true,
                    "email": form.email,
                    "message": message.unwrap_or_else(|| {
                        "Account created. Check your email to verify your account.".to_string()
                    }),
                }),
            )?;
            Ok(Html(html))
        }
        Err(err) => {
            let html = render_page("register", json!({"error": err.user_message()}))?;
            Ok(Html(html))
        }
    }
}

pub async fn logout(State(state): State<AppState>, SessionId(sid): SessionId) -> Redirect {
    state.auth.logout(sid).await;
    Redirect::to("/login")
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// The OAuth provider redirects here. A successful exchange bounces
/// to the login page with the success params; failures land on the
/// login page with an inline error.
pub async fn oauth_callback(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<Redirect> {
    if let Some(error) = query.error {
        let target = format!("/login?error={}", urlencoding::encode(&error));
        return Ok(Redirect::to(&target));
    }
    let Some(code) = query.code else {
        let message = "No authentication code received. Please try logging in again.";
        let target = format!("/login?error={}", urlencoding::encode(message));
        return Ok(Redirect::to(&target));
    };

    match state.auth.complete_oauth(sid, &code).await {
        Ok(user) => {
            let role = match user.role {
                Role::Admin => "ADMIN",
                Role::Vendor => "VENDOR",
                Role::Customer => "CUSTOMER",
            };
            let target = format!(
                "/login?oauth_success=true&name={}&role={role}",
                urlencoding::encode(&user.name)
            );
            Ok(Redirect::to(&target))
        }
        Err(err) => {
            let target = format!("/login?error={}", urlencoding::encode(&err.user_message()));
            Ok(Redirect::to(&target))
        }
    }
}

pub async fn forgot_password_page() -> Result<Html<String>> {
    let html = render_page("forgot_password", json!({}))?;
    Ok(Html(html))
}

pub async fn forgot_password_submit(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Form(form): Form<ForgotPasswordForm>,
) -> Result<Html<String>> {
    if let Err(errors) = form.validate() {
        let html = render_page(
            "forgot_password",
            json!({"error": first_validation_message(&errors)}),
        )?;
        return Ok(Html(html));
    }

    let context = match state.api.forgot_password(sid, &form.email).await {
        Ok(message) => json!({
            "sent": true,
            "message": message
                .unwrap_or_else(|| "If that email exists, a reset link is on its way.".to_string()),
        }),
        Err(err) => json!({"error": err.user_message()}),
    };
    Ok(Html(render_page("forgot_password", context)?))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordQuery {
    pub token: Option<String>,
}

pub async fn reset_password_page(
    Query(query): Query<ResetPasswordQuery>,
) -> Result<Html<String>> {
    let context = match query.token {
        Some(token) => json!({"token": token}),
        None => json!({
            "error": "Invalid or missing reset token. Please request a new password reset link."
        }),
    };
    Ok(Html(render_page("reset_password", context)?))
}

pub async fn reset_password_submit(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Form(form): Form<ResetPasswordForm>,
) -> Result<Html<String>> {
    if let Err(errors) = form.validate() {
        let html = render_page(
            "reset_password",
            json!({"token": form.token, "error": first_validation_message(&errors)}),
        )?;
        return Ok(Html(html));
    }
    if form.password != form.confirm_password {
        let html = render_page(
            "reset_password",
            json!({"token": form.token, "error": "Passwords do not match"}),
        )?;
        return Ok(Html(html));
    }

    let context = match state
        .api
        .reset_password(sid, &form.token, &form.password)
        .await
    {
        Ok(message) => json!({
            "done": true,
            "message": message.unwrap_or_else(|| "Password reset. You can log in now.".to_string()),
        }),
        Err(err) => json!({"token": form.token, "error": err.user_message()}),
    };
    Ok(Html(render_page("reset_password", context)?))
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: Option<String>,
}

pub async fn verify_email_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Html<String>> {
    let Some(token) = query.token else {
        let html = render_page(
            "verify_email",
            json!({"error": "Missing verification token."}),
        )?;
        return Ok(Html(html));
    };

    let context = match state.api.verify_email(sid, &token).await {
        Ok(message) => json!({
            "verified": true,
            "message": message.unwrap_or_else(|| "Email verified. You can log in now.".to_string()),
        }),
        Err(err) => json!({"error": err.user_message()}),
    };
    Ok(Html(render_page("verify_email", context)?))
}

pub async fn resend_verification_submit(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Form(form): Form<ResendVerificationForm>,
) -> Result<Html<String>> {
    if let Err(errors) = form.validate() {
        let html = render_page(
            "verify_email",
            json!({"error": first_validation_message(&errors)}),
        )?;
        return Ok(Html(html));
    }

    let context = match state.api.resend_email_verification(sid, &form.email).await {
        Ok(message) => json!({
            "resent": true,
            "message": message.unwrap_or_else(|| "Verification email sent.".to_string()),
        }),
        Err(err) => json!({"error": err.user_message()}),
    };
    Ok(Html(render_page("verify_email", context)?))
}
