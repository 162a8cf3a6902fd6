use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use chrono::Utc;
use serde_json::json;

use crate::core::error::{AppError, Result};
use crate::core::state::AppState;
use crate::features::discussions::tree::layout_thread;
use crate::features::navigation::menu_for;
use crate::features::session::{CurrentUser, RequireUser, SessionId};
use crate::gateway::GatewayError;
use crate::shared::format::{format_store_hours, parse_contact_info, parse_socials, relative_time};
use crate::shared::templates::render_page;
use crate::shared::types::Role;

/// Business profile page. The favorite count, the viewer's favorite
/// flag and the discussion tree are fetched in parallel once the
/// business itself resolves.
pub async fn profile_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    CurrentUser(user): CurrentUser,
    Path(business_id): Path<i64>,
) -> Result<Html<String>> {
    let business = state.api.get_business(sid, business_id).await?;

    let check_favorite = async {
        if user.is_some() {
            state.api.is_favorite(sid, business_id).await.unwrap_or(false)
        } else {
            false
        }
    };
    let (favorite_count, is_favorite, discussions) = tokio::join!(
        state.api.favorite_count(sid, business_id),
        check_favorite,
        state.api.business_discussions(sid, business_id),
    );

    let favorite_count = favorite_count.unwrap_or(0);
    let discussions = discussions.unwrap_or_default();

    let can_edit = user.as_ref().is_some_and(|u| {
        u.id == business.owner_id || u.role == Role::Admin
    });

    let ui = state.discussion_ui.snapshot(sid, business_id).await;
    let notice = state.discussion_ui.take_notice(sid, business_id).await;
    let thread = layout_thread(&discussions, &ui, user.is_some(), Utc::now());

    let contact = parse_contact_info(business.contact_info.as_deref());
    let socials = parse_socials(business.socials.as_ref());
    let hours = format_store_hours(business.open_time.as_deref(), business.close_time.as_deref());

    let html = render_page(
        "business",
        json!({
            "user": user,
            "menu": menu_for(user.as_ref()),
            "business": business,
            "contact": contact,
            "socials": if socials.is_empty() { None } else { Some(socials) },
            "hours": hours,
            "joined": relative_time(business.created_at, Utc::now()),
            "favoriteCount": favorite_count,
            "isFavorite": is_favorite,
            "canEdit": can_edit,
            "thread": thread,
            "replyingTo": ui.replying_to,
            "notice": notice,
        }),
    )?;
    Ok(Html(html))
}

/// Flip the viewer's favorite. The page re-fetches the authoritative
/// count and flag on the redirect, so no local state is patched; a
/// failed toggle leaves everything as it was and surfaces a notice.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(_user): RequireUser,
    Path(business_id): Path<i64>,
) -> Result<Redirect> {
    match state.api.toggle_favorite(sid, business_id).await {
        Ok(_) => {}
        Err(GatewayError::SessionExpired) => return Err(AppError::SessionExpired),
        Err(err) => {
            let message = err.user_message();
            state
                .discussion_ui
                .update(sid, business_id, |ui| ui.set_notice(message))
                .await;
        }
    }
    Ok(Redirect::to(&format!("/businesses/{business_id}")))
}
