//! In-process session store.

use async_trait::async_trait;
use tokio::sync::Mutex;

use donahub_core::AppResult;
use donahub_entity::user::User;

use super::store::SessionStore;

/// Session store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: Mutex<Option<User>>,
}

impl MemorySessionStore {
    /// Creates an empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> AppResult<Option<User>> {
        Ok(self.current.lock().await.clone())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        *self.current.lock().await = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.current.lock().await.take();
        Ok(())
    }
}
