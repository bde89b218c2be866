//! Notification inbox CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::context::AppContext;
use crate::output;
use donahub_core::error::AppError;
use donahub_core::types::NotificationId;
use donahub_entity::notification::Notification;

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List your notifications, newest first
    List {
        /// Only unread notifications
        #[arg(short, long)]
        unread: bool,
    },
    /// Mark one notification read
    Read {
        /// Notification ID
        id: NotificationId,
    },
    /// Mark one notification unread
    Unread {
        /// Notification ID
        id: NotificationId,
    },
    /// Mark every notification read
    ReadAll,
    /// Delete one notification
    Delete {
        /// Notification ID
        id: NotificationId,
    },
}

/// Notification display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Unread marker
    new: String,
    /// Kind
    kind: String,
    /// Title
    title: String,
    /// Message
    message: String,
    /// Created at
    created_at: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            new: if n.read { String::new() } else { "●".to_string() },
            kind: n.kind.to_string(),
            title: n.title.clone(),
            message: n.message.clone(),
            created_at: output::timestamp(&n.created_at),
        }
    }
}

/// Execute notification commands
pub async fn execute(args: &NotificationArgs, ctx: &AppContext) -> Result<(), AppError> {
    let principal = ctx.principal().await?;
    let notifications = &ctx.services.notifications;

    match &args.command {
        NotificationCommand::List { unread } => {
            let rows: Vec<NotificationRow> = notifications
                .list(&principal)?
                .iter()
                .filter(|n| !*unread || n.is_unread())
                .map(NotificationRow::from)
                .collect();
            output::print_list(&rows, ctx.format);
        }
        NotificationCommand::Read { id } => {
            notifications.mark_read(&principal, *id)?;
            ctx.save().await?;
            output::print_success("Marked as read");
        }
        NotificationCommand::Unread { id } => {
            notifications.mark_unread(&principal, *id)?;
            ctx.save().await?;
            output::print_success("Marked as unread");
        }
        NotificationCommand::ReadAll => {
            let changed = notifications.mark_all_read(&principal)?;
            ctx.save().await?;
            output::print_success(&format!("{changed} notification(s) marked as read"));
        }
        NotificationCommand::Delete { id } => {
            notifications.delete(&principal, *id)?;
            ctx.save().await?;
            output::print_success("Notification deleted");
        }
    }

    Ok(())
}
