pub mod extract;
pub mod service;
pub mod storage;
pub mod store;

pub use extract::{session_middleware, CurrentUser, RequireAdmin, RequireUser, RequireVendor, SessionId};
pub use service::SessionService;
pub use storage::{FileSessionStorage, SessionStorage};
pub use store::SessionStore;
