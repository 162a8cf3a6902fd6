use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::core::state::AppState;
use crate::features::session::{RequireUser, SessionId};
use crate::gateway::GatewayError;
use crate::shared::constants::{MAX_DISCUSSION_LEN, MAX_REPLY_LEN};

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    /// Whether the node's reply list is expanded when untouched.
    /// Root-level lists start expanded, deeper ones collapsed.
    #[serde(default)]
    pub default_expanded: bool,
}

fn back_to(business_id: i64) -> Redirect {
    Redirect::to(&format!("/businesses/{business_id}"))
}

/// Validation runs before any network call; failures surface as a
/// transient notice on the thread, never as a request.
fn validate_content(content: &str, max_len: usize) -> std::result::Result<String, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err("Content cannot be empty".to_string());
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("Content must be at most {max_len} characters"));
    }
    Ok(trimmed.to_string())
}

/// Start a new root discussion on a business.
pub async fn post_discussion(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(_user): RequireUser,
    Path(business_id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Redirect> {
    let content = match validate_content(&form.content, MAX_DISCUSSION_LEN) {
        Ok(content) => content,
        Err(message) => {
            state
                .discussion_ui
                .update(sid, business_id, |ui| ui.set_notice(message))
                .await;
            return Ok(back_to(business_id));
        }
    };

    match state
        .api
        .create_discussion(sid, business_id, &content, None)
        .await
    {
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
    Ok(back_to(business_id))
}

/// Reply to any node in the tree. The whole thread is re-fetched on
/// the following page load, so nothing is patched locally.
pub async fn post_reply(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(_user): RequireUser,
    Path((business_id, parent_id)): Path<(i64, i64)>,
    Form(form): Form<PostForm>,
) -> Result<Redirect> {
    let content = match validate_content(&form.content, MAX_REPLY_LEN) {
        Ok(content) => content,
        Err(message) => {
            state
                .discussion_ui
                .update(sid, business_id, |ui| ui.set_notice(message))
                .await;
            return Ok(back_to(business_id));
        }
    };

    match state
        .api
        .create_discussion(sid, business_id, &content, Some(parent_id))
        .await
    {
        Ok(_) => {
            state
                .discussion_ui
                .update(sid, business_id, |ui| ui.cancel_reply())
                .await;
        }
        Err(GatewayError::SessionExpired) => return Err(AppError::SessionExpired),
        Err(err) => {
            let message = err.user_message();
            state
                .discussion_ui
                .update(sid, business_id, |ui| ui.set_notice(message))
                .await;
        }
    }
    Ok(back_to(business_id))
}

/// Open the reply form on one node, closing any other open form.
pub async fn open_reply_form(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    RequireUser(_user): RequireUser,
    Path((business_id, node_id)): Path<(i64, i64)>,
) -> Result<Redirect> {
    state
        .discussion_ui
        .update(sid, business_id, |ui| ui.open_reply(node_id))
        .await;
    Ok(back_to(business_id))
}

pub async fn cancel_reply_form(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Path(business_id): Path<i64>,
) -> Result<Redirect> {
    state
        .discussion_ui
        .update(sid, business_id, |ui| ui.cancel_reply())
        .await;
    Ok(back_to(business_id))
}

/// Expand or collapse a node's reply list. Guests can use this too.
pub async fn toggle_replies(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    Path((business_id, node_id)): Path<(i64, i64)>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect> {
    state
        .discussion_ui
        .update(sid, business_id, |ui| {
            ui.toggle_replies(node_id, form.default_expanded)
        })
        .await;
    Ok(back_to(business_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_is_rejected() {
        assert!(validate_content("   ", MAX_REPLY_LEN).is_err());
        assert_eq!(validate_content("  hi  ", MAX_REPLY_LEN).unwrap(), "hi");
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 500 multi-byte characters are within the reply limit
        let at_limit = "ñ".repeat(MAX_REPLY_LEN);
        assert!(validate_content(&at_limit, MAX_REPLY_LEN).is_ok());

        let over = "ñ".repeat(MAX_REPLY_LEN + 1);
        assert!(validate_content(&over, MAX_REPLY_LEN).is_err());
    }
}
