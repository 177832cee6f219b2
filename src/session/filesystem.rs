use super::storage::SessionStore;
use crate::error::{CtxChatError, Result};
use crate::models::Session;
use chrono::Local;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const SESSION_EXPIRY_MINUTES: i64 = 30;

pub struct FilesystemSessionStore;

impl FilesystemSessionStore {
    pub fn new() -> Self {
        Self
    }

    fn cache_dir(&self) -> Result<PathBuf> {
        let home = env::var("HOME")
            .map_err(|_| CtxChatError::SessionError("HOME environment variable not set".into()))?;
        let cache_dir = Path::new(&home).join(".cache").join("ctxchat");
        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir)?;
        }
        Ok(cache_dir)
    }

    /// All stored sessions, most recently updated first.
    fn sorted_sessions(&self) -> Vec<(PathBuf, Session)> {
        let Ok(cache_dir) = self.cache_dir() else {
            return Vec::new();
        };

        let mut sessions: Vec<(PathBuf, Session)> = match fs::read_dir(&cache_dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| {
                    let path = entry.path();
                    if path.extension()? == "json"
                        && path.file_name()?.to_str()?.starts_with("session-")
                    {
                        let content = fs::read_to_string(&path).ok()?;
                        let session: Session = serde_json::from_str(&content).ok()?;
                        Some((path, session))
                    } else {
                        None
                    }
                })
                .collect(),
            Err(_) => Vec::new(),
        };

        sessions.sort_by(|a, b| b.1.last_updated.cmp(&a.1.last_updated));
        sessions
    }
}

impl SessionStore for FilesystemSessionStore {
    fn find_recent_session(&self) -> Option<Session> {
        let now = Local::now();
        let sessions = self.sorted_sessions();

        // Return the most recent session if it's not expired
        if let Some((path, session)) = sessions.first() {
            let age_minutes = now
                .signed_duration_since(session.last_updated)
                .num_minutes();
            if age_minutes.abs() < SESSION_EXPIRY_MINUTES {
                return Some(session.clone());
            } else {
                // Clean up expired session
                let _ = fs::remove_file(path);
            }
        }

        None
    }

    fn find_latest_session(&self) -> Option<Session> {
        self.sorted_sessions()
            .into_iter()
            .next()
            .map(|(_, session)| session)
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        let cache_dir = self.cache_dir()?;
        let session_file = cache_dir.join(format!("session-{}.json", session.session_id));
        let content = serde_json::to_string_pretty(session)?;
        fs::write(session_file, content)?;
        Ok(())
    }

    fn clear_all_sessions(&self) -> Result<()> {
        let cache_dir = self.cache_dir()?;
        if let Ok(entries) = fs::read_dir(&cache_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                let is_session_file = path.extension() == Some(std::ffi::OsStr::new("json"))
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .map(|n| n.starts_with("session-"))
                        .unwrap_or(false);
                if is_session_file {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for FilesystemSessionStore {
    fn default() -> Self {
        Self::new()
    }
}
