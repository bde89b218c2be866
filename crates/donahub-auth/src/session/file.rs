//! Session store backed by one JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use donahub_core::AppResult;
use donahub_core::error::{AppError, ErrorKind};
use donahub_entity::user::User;

use super::store::SessionStore;

/// Keeps the logged-in user in a JSON file so separate CLI invocations
/// share one session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> AppResult<Option<User>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read session '{}'", self.path.display()),
                    e,
                ));
            }
        };
        let user = serde_json::from_slice(&raw)?;
        Ok(Some(user))
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(user)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), user_id = %user.id, "Session saved");
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
