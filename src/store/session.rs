use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::session::Session;

/// The client-local persistence for the session record.
///
/// One JSON record (access token, refresh token, user), read at startup
/// and rewritten on every session mutation. The store itself holds no
/// state; the guard is the single owner of the in-memory copy.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted session, if a well-formed one exists.
    ///
    /// A missing or malformed file is never fatal: it is treated as
    /// "no session" so startup can always proceed.
    pub async fn load(&self) -> Option<Session> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("⚠️ Could not read session file: {}", e);
                return None;
            }
        };

        match sonic_rs::from_str::<Session>(&raw) {
            Ok(session) => {
                tracing::debug!("🔑 Restored persisted session for user: {}", session.user.id);
                Some(session)
            }
            Err(e) => {
                tracing::warn!("⚠️ Discarding malformed session file: {}", e);
                None
            }
        }
    }

    /// Writes the session record, replacing any previous one.
    pub async fn save(&self, session: &Session) -> Result<()> {
        let json = sonic_rs::to_string(session)
            .map_err(|e| AppError::Serialization(format!("Session serialization failed: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&self.path, json).await?;
        tracing::debug!("✅ Session persisted for user: {}", session.user.id);
        Ok(())
    }

    /// Removes the persisted record. A missing file is a no-op success.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!("✅ Persisted session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
