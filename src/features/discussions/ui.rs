//! Per-visitor thread UI state. A browser keeps this in component
//! state; here it lives server-side, keyed by session id and
//! business, so expand/collapse and the reply pointer survive the
//! redirect after each form post.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

/// UI state for one visitor on one business's thread.
#[derive(Debug, Clone, Default)]
pub struct ThreadUiState {
    /// At most one reply form is open across the whole tree.
    pub replying_to: Option<i64>,
    expanded: HashMap<i64, bool>,
    notice: Option<String>,
}

impl ThreadUiState {
    /// Opening a form on one node closes any other open form.
    pub fn open_reply(&mut self, id: i64) {
        self.replying_to = Some(id);
    }

    pub fn cancel_reply(&mut self) {
        self.replying_to = None;
    }

    /// Flip the effective state, whatever the node's default was.
    pub fn toggle_replies(&mut self, id: i64, default_expanded: bool) {
        let current = self.is_expanded(id, default_expanded);
        self.expanded.insert(id, !current);
    }

    pub fn is_expanded(&self, id: i64, default_expanded: bool) -> bool {
        self.expanded.get(&id).copied().unwrap_or(default_expanded)
    }

    pub fn set_notice(&mut self, message: String) {
        self.notice = Some(message);
    }

    /// Transient notices render once and clear.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

/// All visitors' thread states, keyed by (session, business).
#[derive(Default)]
pub struct DiscussionUiRegistry {
    inner: RwLock<HashMap<(Uuid, i64), ThreadUiState>>,
}

impl DiscussionUiRegistry {
    pub async fn snapshot(&self, sid: Uuid, business_id: i64) -> ThreadUiState {
        self.inner
            .read()
            .await
            .get(&(sid, business_id))
            .cloned()
            .unwrap_or_default()
    }

    pub async fn update<F>(&self, sid: Uuid, business_id: i64, apply: F)
    where
        F: FnOnce(&mut ThreadUiState),
    {
        let mut guard = self.inner.write().await;
        apply(guard.entry((sid, business_id)).or_default());
    }

    /// Pull the transient notice for rendering, clearing it.
    pub async fn take_notice(&self, sid: Uuid, business_id: i64) -> Option<String> {
        let mut guard = self.inner.write().await;
        guard
            .get_mut(&(sid, business_id))
            .and_then(ThreadUiState::take_notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_pointer_is_exclusive() {
        let mut state = ThreadUiState::default();
        state.open_reply(10);
        state.open_reply(20);
        assert_eq!(state.replying_to, Some(20));
        state.cancel_reply();
        assert_eq!(state.replying_to, None);
    }

    #[test]
    fn test_toggle_flips_the_default() {
        let mut state = ThreadUiState::default();
        // Root-level list defaults to expanded.
        assert!(state.is_expanded(1, true));
        state.toggle_replies(1, true);
        assert!(!state.is_expanded(1, true));

        // Deep list defaults to collapsed.
        assert!(!state.is_expanded(2, false));
        state.toggle_replies(2, false);
        assert!(state.is_expanded(2, false));
        state.toggle_replies(2, false);
        assert!(!state.is_expanded(2, false));
    }

    #[tokio::test]
    async fn test_registry_isolates_visitors() {
        let registry = DiscussionUiRegistry::default();
        let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
        registry.update(a, 1, |s| s.open_reply(5)).await;

        assert_eq!(registry.snapshot(a, 1).await.replying_to, Some(5));
        assert_eq!(registry.snapshot(b, 1).await.replying_to, None);
        assert_eq!(registry.snapshot(a, 2).await.replying_to, None);
    }

    #[tokio::test]
    async fn test_notice_renders_once() {
        let registry = DiscussionUiRegistry::default();
        let sid = Uuid::now_v7();
        registry
            .update(sid, 1, |s| s.set_notice("Failed to post reply".to_string()))
            .await;
        assert_eq!(
            registry.take_notice(sid, 1).await.as_deref(),
            Some("Failed to post reply")
        );
        assert_eq!(registry.take_notice(sid, 1).await, None);
    }
}
