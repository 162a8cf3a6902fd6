use axum::{extract::State, response::Html};
use serde_json::json;

use crate::core::error::Result;
use crate::core::state::AppState;
use crate::features::navigation::menu_for;
use crate::features::session::CurrentUser;
use crate::shared::constants::CATEGORIES;
use crate::shared::templates::render_page;

/// Landing page: hero, search box and the category cards. The search
/// form submits to the directory; nothing is fetched here.
pub async fn home_page(
    State(_state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>> {
    let categories: Vec<_> = CATEGORIES
        .iter()
        .map(|(slug, label)| json!({"slug": slug, "label": label}))
        .collect();

    let html = render_page(
        "home",
        json!({
            "user": user,
            "menu": menu_for(user.as_ref()),
            "categories": categories,
        }),
    )?;
    Ok(Html(html))
}
