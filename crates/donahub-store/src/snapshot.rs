//! JSON snapshots of the whole store.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use donahub_core::AppResult;
use donahub_core::error::AppError;
use donahub_entity::material::Material;
use donahub_entity::notification::Notification;
use donahub_entity::request::Request;
use donahub_entity::user::User;

use crate::store::EntityStore;

/// Serializable copy of every collection, each in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Users.
    #[serde(default)]
    pub users: Vec<User>,
    /// Materials.
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Requests.
    #[serde(default)]
    pub requests: Vec<Request>,
    /// Notifications.
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl EntityStore {
    /// Copy the current contents.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            users: self.all(),
            materials: self.all(),
            requests: self.all(),
            notifications: self.all(),
        }
    }

    /// Build a store from a snapshot, preserving its order.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let store = Self::new();
        snapshot.users.into_iter().for_each(|u| store.put(u));
        snapshot.materials.into_iter().for_each(|m| store.put(m));
        snapshot.requests.into_iter().for_each(|r| store.put(r));
        snapshot.notifications.into_iter().for_each(|n| store.put(n));
        store
    }

    /// Load a store from a JSON snapshot file. A missing file yields an
    /// empty store.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await? {
            debug!(path = %path.display(), "No snapshot file, starting empty");
            return Ok(Self::new());
        }
        let raw = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                donahub_core::ErrorKind::Storage,
                format!("Failed to read snapshot '{}'", path.display()),
                e,
            )
        })?;
        let snapshot: StoreSnapshot = serde_json::from_slice(&raw)?;
        info!(
            path = %path.display(),
            users = snapshot.users.len(),
            materials = snapshot.materials.len(),
            requests = snapshot.requests.len(),
            notifications = snapshot.notifications.len(),
            "Loaded store snapshot"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Write the store to a JSON snapshot file, creating parent
    /// directories as needed.
    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(&self.snapshot())?;
        tokio::fs::write(path, json).await.map_err(|e| {
            AppError::with_source(
                donahub_core::ErrorKind::Storage,
                format!("Failed to write snapshot '{}'", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), "Saved store snapshot");
        Ok(())
    }
}
