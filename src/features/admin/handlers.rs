use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use serde_json::json;

use crate::core::error::{AppError, Result};
use crate::core::state::AppState;
use crate::features::navigation::menu_for;
use crate::features::session::{RequireAdmin, SessionId};
use crate::shared::templates::render_page;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

/// Platform overview: backend counters plus the verification queue.
pub async fn admin_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireAdmin(user): RequireAdmin,
) -> Result<Html<String>> {
    let (stats, pending) = tokio::join!(
        state.api.admin_dashboard(sid),
        state.api.pending_businesses(sid),
    );

    let html = render_page(
        "admin",
        json!({
            "user": user,
            "menu": menu_for(Some(&user)),
            "stats": stats.unwrap_or(serde_json::Value::Null),
            "pending": pending.unwrap_or_default(),
        }),
    )?;
    Ok(Html(html))
}

pub async fn users_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireAdmin(user): RequireAdmin,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let page = state.api.admin_users(sid, query.page.unwrap_or(1)).await?;
    let html = render_page(
        "admin_users",
        json!({
            "user": user,
            "menu": menu_for(Some(&user)),
            "users": page.users,
            "pagination": page.pagination,
        }),
    )?;
    Ok(Html(html))
}

pub async fn change_user_role(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireAdmin(_user): RequireAdmin,
    Path(user_id): Path<String>,
    Form(form): Form<RoleForm>,
) -> Result<Redirect> {
    if !matches!(form.role.as_str(), "CUSTOMER" | "VENDOR" | "ADMIN") {
        return Err(AppError::Validation(format!("Unknown role: {}", form.role)));
    }
    state.api.set_user_role(sid, &user_id, &form.role).await?;
    Ok(Redirect::to("/admin/users"))
}

pub async fn delete_user(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireAdmin(_user): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<Redirect> {
    state.api.delete_user(sid, &user_id).await?;
    Ok(Redirect::to("/admin/users"))
}

pub async fn businesses_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireAdmin(user): RequireAdmin,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let page = state
        .api
        .admin_businesses(sid, query.page.unwrap_or(1))
        .await?;
    let html = render_page(
        "admin_businesses",
        json!({
            "user": user,
            "menu": menu_for(Some(&user)),
            "businesses": page.businesses,
            "pagination": page.pagination,
        }),
    )?;
    Ok(Html(html))
}

pub async fn verify_business(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.api.verify_business(sid, id).await?;
    Ok(Redirect::to("/admin"))
}

pub async fn unverify_business(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.api.unverify_business(sid, id).await?;
    Ok(Redirect::to("/admin/businesses"))
}

pub async fn delete_business(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.api.admin_delete_business(sid, id).await?;
    Ok(Redirect::to("/admin/businesses"))
}
