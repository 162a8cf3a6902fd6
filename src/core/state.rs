use std::sync::Arc;

use crate::core::config::Config;
use crate::features::discussions::ui::DiscussionUiRegistry;
use crate::features::session::{SessionService, SessionStore};
use crate::gateway::ApiClient;

/// Shared application state handed to every router.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub api: Arc<ApiClient>,
    pub auth: Arc<SessionService>,
    pub discussion_ui: Arc<DiscussionUiRegistry>,
}
