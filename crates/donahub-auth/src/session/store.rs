//! Session store trait.

use async_trait::async_trait;

use donahub_core::AppResult;
use donahub_entity::user::User;

/// Holds at most one serialized [`User`]: whoever is logged in.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// The stored user, if any.
    async fn load(&self) -> AppResult<Option<User>>;

    /// Replace the stored user.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Forget the stored user. Clearing an empty session is not an error.
    async fn clear(&self) -> AppResult<()>;
}
