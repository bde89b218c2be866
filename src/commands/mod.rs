//! CLI command definitions and dispatch.

pub mod account;
pub mod material;
pub mod notification;
pub mod overview;
pub mod request;

use clap::{Parser, Subcommand};

use crate::context::AppContext;
use crate::output::OutputFormat;
use donahub_core::config::AppConfig;
use donahub_core::error::AppError;

/// DonaHub: construction material donation platform
#[derive(Debug, Parser)]
#[command(name = "donahub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Accounts and the current session
    Account(account::AccountArgs),
    /// Material catalog
    Material(material::MaterialArgs),
    /// Donation requests
    Request(request::RequestArgs),
    /// Notification inbox
    Notification(notification::NotificationArgs),
    /// Role dashboard of the logged-in user
    Dashboard,
    /// Recent platform activity
    Activity {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Platform-wide donation impact
    Impact,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let ctx = AppContext::open(config, self.format).await?;
        match &self.command {
            Commands::Account(args) => account::execute(args, &ctx).await,
            Commands::Material(args) => material::execute(args, &ctx).await,
            Commands::Request(args) => request::execute(args, &ctx).await,
            Commands::Notification(args) => notification::execute(args, &ctx).await,
            Commands::Dashboard => overview::dashboard(&ctx).await,
            Commands::Activity { limit } => overview::activity(*limit, &ctx),
            Commands::Impact => overview::impact(&ctx),
        }
    }
}
