//! Entity store and session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where the entity store snapshot lives and how it is initialised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON snapshot file.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Install the demo data set when the snapshot file does not exist.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            seed_demo_data: true,
        }
    }
}

/// Current-user session persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the file holding the serialized current user.
    #[serde(default = "default_session_file")]
    pub file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

fn default_data_file() -> String {
    "data/store.json".to_string()
}

fn default_session_file() -> String {
    "data/session.json".to_string()
}

fn default_true() -> bool {
    true
}
