use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use serde_json::json;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::state::AppState;
use crate::features::auth_pages::dtos::first_validation_message;
use crate::features::dashboard::dtos::BusinessForm;
use crate::features::navigation::menu_for;
use crate::features::session::{RequireUser, RequireVendor, SessionId};
use crate::shared::constants::{BARANGAYS, CATEGORIES};
use crate::shared::templates::render_page;
use crate::shared::types::{Role, User};

fn vocab_context() -> serde_json::Value {
    let categories: Vec<_> = CATEGORIES
        .iter()
        .map(|(slug, label)| json!({"slug": slug, "label": label}))
        .collect();
    json!({"categories": categories, "barangays": BARANGAYS})
}

fn can_manage(user: &User, owner_id: &str) -> bool {
    user.id == owner_id || user.role == Role::Admin
}

/// Owner overview: listing counts and verification status at a
/// glance.
pub async fn dashboard_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireVendor(user): RequireVendor,
) -> Result<Html<String>> {
    let businesses = state.api.my_businesses(sid).await?;
    let verified = businesses.iter().filter(|b| b.is_verified).count();

    let html = render_page(
        "dashboard",
        json!({
            "user": user,
            "menu": menu_for(Some(&user)),
            "businesses": businesses,
            "verifiedCount": verified,
        }),
    )?;
    Ok(Html(html))
}

/// Management list with edit and delete actions per listing.
pub async fn my_businesses_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(user): RequireUser,
) -> Result<Html<String>> {
    let businesses = state.api.my_businesses(sid).await?;
    let html = render_page(
        "my_businesses",
        json!({
            "user": user,
            "menu": menu_for(Some(&user)),
            "businesses": businesses,
        }),
    )?;
    Ok(Html(html))
}

pub async fn new_business_page(RequireUser(user): RequireUser) -> Result<Html<String>> {
    let mut context = vocab_context();
    context["user"] = json!(user);
    context["menu"] = json!(menu_for(Some(&user)));
    Ok(Html(render_page("business_form", context)?))
}

pub async fn create_business(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(user): RequireUser,
    Form(form): Form<BusinessForm>,
) -> Result<axum::response::Response> {
    use axum::response::IntoResponse;

    if let Err(errors) = form.validate() {
        let mut context = vocab_context();
        context["user"] = json!(user);
        context["menu"] = json!(menu_for(Some(&user)));
        context["error"] = json!(first_validation_message(&errors));
        context["form"] = json!(form.to_payload());
        return Ok(Html(render_page("business_form", context)?).into_response());
    }

    let business = state.api.create_business(sid, &form.to_payload()).await?;
    Ok(Redirect::to(&format!("/businesses/{}", business.id)).into_response())
}

pub async fn edit_business_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let business = state.api.get_business(sid, id).await?;
    if !can_manage(&user, &business.owner_id) {
        return Err(AppError::Forbidden(
            "Only the owner can edit this listing".to_string(),
        ));
    }

    let mut context = vocab_context();
    context["user"] = json!(user);
    context["menu"] = json!(menu_for(Some(&user)));
    context["editing"] = json!(business.id);
    context["form"] = json!(business);
    Ok(Html(render_page("business_form", context)?))
}

pub async fn update_business(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
    Form(form): Form<BusinessForm>,
) -> Result<axum::response::Response> {
    use axum::response::IntoResponse;

    let business = state.api.get_business(sid, id).await?;
    if !can_manage(&user, &business.owner_id) {
        return Err(AppError::Forbidden(
            "Only the owner can edit this listing".to_string(),
        ));
    }

    if let Err(errors) = form.validate() {
        let mut context = vocab_context();
        context["user"] = json!(user);
        context["menu"] = json!(menu_for(Some(&user)));
        context["editing"] = json!(id);
        context["error"] = json!(first_validation_message(&errors));
        context["form"] = json!(form.to_payload());
        return Ok(Html(render_page("business_form", context)?).into_response());
    }

    state.api.update_business(sid, id, &form.to_payload()).await?;
    Ok(Redirect::to(&format!("/businesses/{id}")).into_response())
}

pub async fn delete_business(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    let business = state.api.get_business(sid, id).await?;
    if !can_manage(&user, &business.owner_id) {
        return Err(AppError::Forbidden(
            "Only the owner can delete this listing".to_string(),
        ));
    }
    state.api.delete_business(sid, id).await?;
    Ok(Redirect::to("/my-businesses"))
}
