//! Application configuration schemas.
//!
//! All configuration structs are deserialized from a TOML file via the
//! `config` crate, overlaid with `DONAHUB__*` environment variables. Every
//! section has defaults, so a missing file still yields a usable config.

pub mod logging;
pub mod notification;
pub mod store;
pub mod workflow;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::notification::NotificationsConfig;
pub use self::store::{SessionConfig, StoreConfig};
pub use self::workflow::{RemovalPolicy, SiblingPolicy, WorkflowConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Entity store snapshot settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Workflow policies.
    #[serde(default)]
    pub workflow: WorkflowConfig,
    /// Notification settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `DONAHUB__` override individual keys, e.g.
    /// `DONAHUB__WORKFLOW__SIBLING_POLICY=keep_pending`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("DONAHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
