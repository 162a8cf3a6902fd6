use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One visitor's persisted state: exactly the three string entries the
/// frontend keeps — access token, refresh token, JSON-serialized user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl SessionEntry {
    /// "Logged in" means token + user are both present.
    pub fn is_complete(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}

/// Persistence seam for the session store.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn load(&self) -> anyhow::Result<HashMap<Uuid, SessionEntry>>;
    async fn persist(&self, entries: &HashMap<Uuid, SessionEntry>) -> anyhow::Result<()>;
}

/// JSON-file-backed storage used by the running server.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> anyhow::Result<HashMap<Uuid, SessionEntry>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &HashMap<Uuid, SessionEntry>) -> anyhow::Result<()> {
        let raw = serde_json::to_string(entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

/// In-memory storage for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySessionStorage;

#[cfg(test)]
#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> anyhow::Result<HashMap<Uuid, SessionEntry>> {
        Ok(HashMap::new())
    }

    async fn persist(&self, _entries: &HashMap<Uuid, SessionEntry>) -> anyhow::Result<()> {
        Ok(())
    }
}
