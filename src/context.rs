//! Per-invocation runtime state shared by all commands.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use donahub_auth::{FileSessionStore, Principal};
use donahub_core::AppResult;
use donahub_core::config::AppConfig;
use donahub_service::Services;
use donahub_store::{EntityStore, seed_demo};

use crate::output::OutputFormat;

/// Loaded store, wired services and output settings for one command.
#[derive(Debug)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Selected output format.
    pub format: OutputFormat,
    /// Services over the loaded store.
    pub services: Services,
}

impl AppContext {
    /// Load the snapshot, installing the demo data on first run when
    /// configured to.
    pub async fn open(config: AppConfig, format: OutputFormat) -> AppResult<Self> {
        let data_file = config.store.data_file.clone();
        let first_run = !Path::new(&data_file).exists();
        let store = EntityStore::load(&data_file).await?;

        if first_run && config.store.seed_demo_data && store.is_empty() {
            seed_demo(&store)?;
            store.save(&data_file).await?;
            info!(path = %data_file, "Installed demo data");
        }

        let sessions = Arc::new(FileSessionStore::new(&config.session.file));
        let services = Services::new(&config, Arc::new(store), sessions);
        Ok(Self {
            config,
            format,
            services,
        })
    }

    /// The logged-in principal.
    pub async fn principal(&self) -> AppResult<Principal> {
        self.services.auth.require_current().await
    }

    /// Persist the store.
    pub async fn save(&self) -> AppResult<()> {
        self.services.store.save(&self.config.store.data_file).await
    }
}
