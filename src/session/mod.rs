mod filesystem;
mod storage;

pub use filesystem::{FilesystemSessionStore, SESSION_EXPIRY_MINUTES};
pub use storage::SessionStore;

use crate::models::Session;
use chrono::Local;
use uuid::Uuid;

pub const MAX_CONVERSATION_PAIRS: usize = 3; // Keep last 3 exchanges (6 messages)

/// Create a new session with a fresh id and no history.
pub fn create_new_session() -> Session {
    Session {
        session_id: Uuid::new_v4().to_string(),
        last_updated: Local::now(),
        messages: vec![],
    }
}
