use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::session::Session;

/// Error type for session persistence
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not write session file {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not remove session file {path}: {source}")]
    ClearError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Durable storage for the logged-in identity (`session.json`, holding the
/// `user_id` and `username` keys).
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    /// Store at the default state-directory location
    pub fn default_location() -> Self {
        Self::new(super::paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted session. Missing or unreadable files mean "logged out".
    pub fn load(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed session file");
                None
            }
        }
    }

    /// Persist the session atomically
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        self.write_atomic(session).map_err(|e| SessionError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_atomic(&self, session: &Session) -> Result<(), std::io::Error> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(session)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Remove all persisted client state. Succeeds when nothing was stored.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::ClearError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}
