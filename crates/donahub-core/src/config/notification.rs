//! Notification dispatcher configuration.

use serde::{Deserialize, Serialize};

/// Notification retention and in-process fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Capacity of the broadcast channel feeding live subscribers.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Maximum notifications kept per user; `0` disables the cap.
    #[serde(default = "default_max_stored")]
    pub max_stored_per_user: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            max_stored_per_user: default_max_stored(),
        }
    }
}

fn default_channel_capacity() -> usize {
    256
}

fn default_max_stored() -> usize {
    200
}
