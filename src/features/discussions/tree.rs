//! Pure layout for the discussion thread. The backend hands back a
//! fully nested tree per business; this module flattens it into
//! renderable rows, applying the depth cap, the expand/collapse
//! state and the indentation arithmetic. Rendering stays in the
//! template; nothing here touches the network.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::features::discussions::ui::ThreadUiState;
use crate::shared::constants::MAX_NESTING_DEPTH;
use crate::shared::format::relative_time;
use crate::shared::types::Discussion;

// Root posts show a 40px avatar with a 12px gap; replies show a 32px
// avatar with the same gap plus a 16px bordered inset per level.
const BASE_INDENT: u32 = 52;
const LEVEL_INDENT: u32 = 40;
const BORDER_PADDING: u32 = 16;

/// One renderable row of the thread, root posts included.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRow {
    pub id: i64,
    pub content: String,
    pub author_name: String,
    pub author_image: Option<String>,
    pub posted: String,
    pub is_root: bool,
    pub indent_px: u32,
    /// Reply affordances are suppressed at the nesting cap.
    pub can_reply: bool,
    pub reply_form_open: bool,
    pub has_replies: bool,
    pub reply_count: usize,
    pub expanded: bool,
}

/// Replies plus all transitive descendants.
pub fn count_total_replies(replies: &[Discussion]) -> usize {
    replies
        .iter()
        .map(|r| 1 + count_total_replies(&r.replies))
        .sum()
}

/// Indentation for a reply at the given depth. First-level replies
/// align under the root avatar; each deeper level insets from its
/// parent.
pub fn indent(depth: usize, parent_indent: u32) -> u32 {
    if depth == 0 {
        BASE_INDENT
    } else {
        parent_indent + LEVEL_INDENT + BORDER_PADDING
    }
}

/// Flatten the tree into rows. Collapsed subtrees and anything below
/// the depth cap are omitted entirely; the reply form flag is set on
/// at most one row because the state holds a single pointer.
pub fn layout_thread(
    roots: &[Discussion],
    ui: &ThreadUiState,
    viewer_logged_in: bool,
    now: DateTime<Utc>,
) -> Vec<ThreadRow> {
    let mut rows = Vec::new();
    for root in roots {
        let expanded = ui.is_expanded(root.id, true);
        rows.push(ThreadRow {
            id: root.id,
            content: root.content.clone(),
            author_name: root.user.name.clone(),
            author_image: root.user.image.clone(),
            posted: relative_time(root.created_at, now),
            is_root: true,
            indent_px: 0,
            can_reply: viewer_logged_in,
            reply_form_open: ui.replying_to == Some(root.id),
            has_replies: !root.replies.is_empty(),
            reply_count: count_total_replies(&root.replies),
            expanded,
        });
        if expanded {
            for reply in &root.replies {
                push_reply(&mut rows, reply, 0, 0, ui, viewer_logged_in, now);
            }
        }
    }
    rows
}

fn push_reply(
    rows: &mut Vec<ThreadRow>,
    node: &Discussion,
    depth: usize,
    parent_indent: u32,
    ui: &ThreadUiState,
    viewer_logged_in: bool,
    now: DateTime<Utc>,
) {
    let within_cap = depth < MAX_NESTING_DEPTH;
    let indent_px = indent(depth, parent_indent);
    let expanded = ui.is_expanded(node.id, false);

    rows.push(ThreadRow {
        id: node.id,
        content: node.content.clone(),
        author_name: node.user.name.clone(),
        author_image: node.user.image.clone(),
        posted: relative_time(node.created_at, now),
        is_root: false,
        indent_px,
        can_reply: viewer_logged_in && within_cap,
        reply_form_open: viewer_logged_in && within_cap && ui.replying_to == Some(node.id),
        has_replies: within_cap && !node.replies.is_empty(),
        reply_count: count_total_replies(&node.replies),
        expanded,
    });

    // Children past the cap stay in the payload but never render.
    if within_cap && expanded {
        for child in &node.replies {
            push_reply(rows, child, depth + 1, indent_px, ui, viewer_logged_in, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::shared::types::AuthorSummary;

    fn node(id: i64, replies: Vec<Discussion>) -> Discussion {
        Discussion {
            id,
            content: format!("post {id}"),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            business_id: 1,
            user_id: "u1".to_string(),
            parent_id: None,
            user: AuthorSummary {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                image: None,
            },
            replies,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap()
    }

    /// A chain deep enough that the last links sit past the cap.
    fn deep_chain(len: i64) -> Discussion {
        let mut current = node(len, Vec::new());
        for id in (1..len).rev() {
            current = node(id, vec![current]);
        }
        current
    }

    #[test]
    fn test_count_includes_nested_replies() {
        let tree = vec![node(2, vec![node(3, vec![node(4, Vec::new())])]), node(5, Vec::new())];
        assert_eq!(count_total_replies(&tree), 4);
        assert_eq!(count_total_replies(&[]), 0);
    }

    #[test]
    fn test_indent_math() {
        assert_eq!(indent(0, 0), 52);
        assert_eq!(indent(1, 52), 108);
        assert_eq!(indent(2, 108), 164);
    }

    #[test]
    fn test_root_replies_default_expanded() {
        let roots = vec![node(1, vec![node(2, Vec::new())])];
        let rows = layout_thread(&roots, &ThreadUiState::default(), true, now());
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_root);
        assert!(rows[0].expanded);
        assert_eq!(rows[1].id, 2);
    }

    #[test]
    fn test_deeper_levels_default_collapsed() {
        // Reply 2 carries a nested reply 3; it renders collapsed.
        let roots = vec![node(1, vec![node(2, vec![node(3, Vec::new())])])];
        let rows = layout_thread(&roots, &ThreadUiState::default(), true, now());
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(rows[1].has_replies);
        assert!(!rows[1].expanded);
    }

    #[test]
    fn test_expanded_override_renders_children() {
        let roots = vec![node(1, vec![node(2, vec![node(3, Vec::new())])])];
        let mut ui = ThreadUiState::default();
        ui.toggle_replies(2, false);
        let rows = layout_thread(&roots, &ui, true, now());
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_depth_cap_suppresses_controls_and_children() {
        let roots = vec![node(0, vec![deep_chain(7)])];
        let mut ui = ThreadUiState::default();
        for id in 1..=7 {
            ui.toggle_replies(id, false);
        }
        let rows = layout_thread(&roots, &ui, true, now());
        // Root plus replies at depths 0..=5; the node at depth 6 is cut.
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6]);

        let depth4 = rows.iter().find(|r| r.id == 5).unwrap();
        assert!(depth4.can_reply);
        let depth5 = rows.iter().find(|r| r.id == 6).unwrap();
        assert!(!depth5.can_reply);
        assert!(!depth5.has_replies);
    }

    #[test]
    fn test_guest_sees_no_reply_controls() {
        let roots = vec![node(1, vec![node(2, Vec::new())])];
        let rows = layout_thread(&roots, &ThreadUiState::default(), false, now());
        assert!(rows.iter().all(|r| !r.can_reply));
    }

    #[test]
    fn test_reply_form_open_on_single_row() {
        let roots = vec![node(1, vec![node(2, Vec::new()), node(3, Vec::new())])];
        let mut ui = ThreadUiState::default();
        ui.open_reply(2);
        ui.open_reply(3);
        let rows = layout_thread(&roots, &ui, true, now());
        let open: Vec<i64> = rows.iter().filter(|r| r.reply_form_open).map(|r| r.id).collect();
        assert_eq!(open, vec![3]);
    }
}
