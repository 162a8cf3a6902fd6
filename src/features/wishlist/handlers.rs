use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::core::error::Result;
use crate::core::state::AppState;
use crate::features::navigation::menu_for;
use crate::features::session::{RequireUser, SessionId};
use crate::shared::format::relative_time;
use crate::shared::templates::render_page;
use crate::shared::types::Favorite;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WishlistEntry {
    #[serde(flatten)]
    favorite: Favorite,
    saved: String,
}

/// The viewer's saved businesses.
pub async fn wishlist_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(user): RequireUser,
) -> Result<Html<String>> {
    let favorites = state.api.favorites(sid).await?;
    let now = Utc::now();
    let entries: Vec<WishlistEntry> = favorites
        .into_iter()
        .map(|favorite| WishlistEntry {
            saved: relative_time(favorite.created_at, now),
            favorite,
        })
        .collect();

    let html = render_page(
        "wishlist",
        json!({
            "user": user,
            "menu": menu_for(Some(&user)),
            "favorites": entries,
        }),
    )?;
    Ok(Html(html))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(_user): RequireUser,
    Path(business_id): Path<i64>,
) -> Result<Redirect> {
    state.api.remove_favorite(sid, business_id).await?;
    Ok(Redirect::to("/wishlist"))
}
