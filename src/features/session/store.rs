use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::session::storage::{SessionEntry, SessionStorage};
use crate::shared::types::{AuthTokens, User};

/// Holds every visitor's session entry. All session writes go through this
/// type; the gateway reads tokens from it and hands back refreshed ones.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    entries: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    /// Restore persisted sessions. An entry missing either its access
    /// token or its user record is dropped entirely — no partial session
    /// survives a restart.
    pub async fn restore(storage: Arc<dyn SessionStorage>) -> anyhow::Result<Self> {
        let mut entries = storage.load().await?;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_complete());
        if entries.len() < before {
            tracing::info!(
                "Dropped {} partial session(s) during restore",
                before - entries.len()
            );
            storage.persist(&entries).await?;
        }

        Ok(Self {
            storage,
            entries: RwLock::new(entries),
        })
    }

    pub async fn current_user(&self, sid: Uuid) -> Option<User> {
        let entries = self.entries.read().await;
        let raw = entries.get(&sid)?.user.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding unreadable cached user: {}", e);
                None
            }
        }
    }

    pub async fn access_token(&self, sid: Uuid) -> Option<String> {
        self.entries.read().await.get(&sid)?.access_token.clone()
    }

    pub async fn refresh_token(&self, sid: Uuid) -> Option<String> {
        self.entries.read().await.get(&sid)?.refresh_token.clone()
    }

    /// Write the full token pair + user record. This is the only path
    /// that establishes a session (login and OAuth completion both land
    /// here) and it is idempotent.
    pub async fn set_auth_data(&self, sid: Uuid, tokens: &AuthTokens, user: &User) {
        let serialized = match serde_json::to_string(user) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to serialize user for session: {}", e);
                return;
            }
        };
        let mut entries = self.entries.write().await;
        entries.insert(
            sid,
            SessionEntry {
                access_token: Some(tokens.access_token.clone()),
                refresh_token: Some(tokens.refresh_token.clone()),
                user: Some(serialized),
            },
        );
        self.persist(&entries).await;
    }

    /// Swap in a refreshed access token, leaving the rest of the entry
    /// untouched. Used by the gateway after a successful token refresh.
    pub async fn set_access_token(&self, sid: Uuid, access_token: String) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(&sid) {
            entry.access_token = Some(access_token);
            self.persist(&entries).await;
        }
    }

    /// Drop every persisted entry for this visitor.
    pub async fn clear(&self, sid: Uuid) {
        let mut entries = self.entries.write().await;
        if entries.remove(&sid).is_some() {
            self.persist(&entries).await;
        }
    }

    async fn persist(&self, entries: &HashMap<Uuid, SessionEntry>) {
        if let Err(e) = self.storage.persist(entries).await {
            tracing::error!("Failed to persist session store: {}", e);
        }
    }
}
