//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use donahub_core::types::{NotificationId, UserId};

use super::kind::NotificationKind;

/// A notification delivered to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// What triggered it.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Related ids (request, material) as JSON.
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    /// Whether the user has read this notification.
    #[serde(default)]
    pub read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification stamped now.
    pub fn new(
        user_id: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            payload,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Check if the notification has not been read.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}
