//! Donation request CLI commands.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::context::AppContext;
use crate::output;
use donahub_core::error::AppError;
use donahub_core::types::{MaterialId, RequestId, UserId};
use donahub_entity::material::Material;
use donahub_entity::request::{Request, RequestStatus};
use donahub_entity::user::{User, UserRole};
use donahub_service::Decision;

/// Arguments for request commands
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Request subcommand
    #[command(subcommand)]
    pub command: RequestCommand,
}

/// Request subcommands
#[derive(Debug, Subcommand)]
pub enum RequestCommand {
    /// Ask for an available material
    Submit {
        /// Material ID
        material: MaterialId,
        /// Message to the company
        #[arg(short, long)]
        message: String,
    },
    /// Requests relevant to the logged-in user
    List {
        /// Only requests on this owned material
        #[arg(long)]
        material: Option<MaterialId>,
        /// Approved requests waiting for a volunteer in your zones
        #[arg(long)]
        assignable: bool,
    },
    /// Show one request
    Show {
        /// Request ID
        id: RequestId,
    },
    /// Approve or reject a pending request
    Decide {
        /// Request ID
        id: RequestId,
        /// approve or reject
        decision: Decision,
    },
    /// Approve a pending request
    Approve {
        /// Request ID
        id: RequestId,
    },
    /// Reject a pending request
    Reject {
        /// Request ID
        id: RequestId,
    },
    /// Assign a volunteer to an approved request
    Assign {
        /// Request ID
        id: RequestId,
        /// Volunteer ID; defaults to yourself
        #[arg(long)]
        volunteer: Option<UserId>,
    },
    /// Move a request to in_transit or completed
    Advance {
        /// Request ID
        id: RequestId,
        /// Target status
        status: RequestStatus,
    },
    /// Set the pickup date and transport notes
    Schedule {
        /// Request ID
        id: RequestId,
        /// Pickup date, YYYY-MM-DD or RFC 3339
        #[arg(long, value_parser = parse_date)]
        date: Option<DateTime<Utc>>,
        /// Transport notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remind the NGO to collect an approved request
    Remind {
        /// Request ID
        id: RequestId,
    },
}

/// Request display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RequestRow {
    /// Request ID
    id: String,
    /// Material title
    material: String,
    /// Requesting NGO
    ngo: String,
    /// Status
    status: String,
    /// Assigned volunteer
    volunteer: String,
    /// Pickup date
    pickup: String,
    /// Created at
    created_at: String,
}

/// Execute request commands
pub async fn execute(args: &RequestArgs, ctx: &AppContext) -> Result<(), AppError> {
    let workflow = &ctx.services.workflow;

    match &args.command {
        RequestCommand::Submit { material, message } => {
            let principal = ctx.principal().await?;
            let request = workflow.submit(&principal, *material, message)?;
            ctx.save().await?;
            output::print_success(&format!("Request {} sent", request.id));
        }
        RequestCommand::List {
            material,
            assignable,
        } => {
            let principal = ctx.principal().await?;
            let requests = match (material, *assignable, principal.role) {
                (Some(material_id), _, _) => {
                    workflow.list_for_material(&principal, *material_id)?
                }
                (None, true, _) => workflow.list_assignable(&principal)?,
                (None, false, UserRole::Company) => workflow.list_for_company(&principal)?,
                (None, false, UserRole::Ngo) => workflow.list_for_ngo(&principal)?,
                (None, false, UserRole::Volunteer) => workflow.list_for_volunteer(&principal)?,
            };
            let rows: Vec<RequestRow> = requests.iter().map(|r| row(r, ctx)).collect();
            output::print_list(&rows, ctx.format);
        }
        RequestCommand::Show { id } => {
            let request = workflow.get(*id)?;
            print_request(&request, ctx);
        }
        RequestCommand::Decide { id, decision } => {
            decide(ctx, *id, *decision).await?;
        }
        RequestCommand::Approve { id } => {
            decide(ctx, *id, Decision::Approve).await?;
        }
        RequestCommand::Reject { id } => {
            decide(ctx, *id, Decision::Reject).await?;
        }
        RequestCommand::Assign { id, volunteer } => {
            let principal = ctx.principal().await?;
            let volunteer = volunteer.unwrap_or(principal.user_id);
            let request = workflow.assign_volunteer(&principal, *id, volunteer)?;
            ctx.save().await?;
            output::print_success(&format!(
                "Volunteer {} assigned to request {}",
                name_of(ctx, volunteer),
                request.id
            ));
        }
        RequestCommand::Advance { id, status } => {
            let principal = ctx.principal().await?;
            let request = workflow.advance(&principal, *id, *status)?;
            ctx.save().await?;
            output::print_success(&format!("Request {} is now {}", request.id, request.status));
        }
        RequestCommand::Schedule { id, date, notes } => {
            let principal = ctx.principal().await?;
            let request = workflow.schedule_pickup(&principal, *id, *date, notes.clone())?;
            ctx.save().await?;
            output::print_success(&format!(
                "Pickup for request {} set to {}",
                request.id,
                output::or_dash(request.pickup_date.as_ref().map(output::timestamp))
            ));
        }
        RequestCommand::Remind { id } => {
            let principal = ctx.principal().await?;
            let request = workflow.send_pickup_reminder(&principal, *id)?;
            ctx.save().await?;
            output::print_success(&format!("Reminder sent for request {}", request.id));
        }
    }

    Ok(())
}

async fn decide(ctx: &AppContext, id: RequestId, decision: Decision) -> Result<(), AppError> {
    let principal = ctx.principal().await?;
    let request = ctx.services.workflow.decide(&principal, id, decision)?;
    ctx.save().await?;
    output::print_success(&format!("Request {} is now {}", request.id, request.status));
    Ok(())
}

fn name_of(ctx: &AppContext, id: UserId) -> String {
    ctx.services
        .store
        .find::<User>(id)
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| id.to_string())
}

fn title_of(ctx: &AppContext, id: MaterialId) -> String {
    ctx.services
        .store
        .find::<Material>(id)
        .map(|m| m.title)
        .unwrap_or_else(|| "(deleted)".to_string())
}

fn row(r: &Request, ctx: &AppContext) -> RequestRow {
    RequestRow {
        id: r.id.to_string(),
        material: title_of(ctx, r.material_id),
        ngo: name_of(ctx, r.ngo_id),
        status: r.status.to_string(),
        volunteer: output::or_dash(r.volunteer_id.map(|v| name_of(ctx, v))),
        pickup: output::or_dash(r.pickup_date.as_ref().map(output::timestamp)),
        created_at: output::timestamp(&r.created_at),
    }
}

fn print_request(request: &Request, ctx: &AppContext) {
    output::print_item(request, ctx.format, |r| {
        output::print_kv("ID", &r.id.to_string());
        output::print_kv("Material", &title_of(ctx, r.material_id));
        output::print_kv("NGO", &name_of(ctx, r.ngo_id));
        output::print_kv("Status", r.status.as_str());
        output::print_kv("Message", &r.message);
        output::print_kv(
            "Volunteer",
            &output::or_dash(r.volunteer_id.map(|v| name_of(ctx, v))),
        );
        output::print_kv(
            "Pickup",
            &output::or_dash(r.pickup_date.as_ref().map(output::timestamp)),
        );
        output::print_kv("Transport notes", r.transport_notes.as_deref().unwrap_or("-"));
        output::print_kv("Created", &output::timestamp(&r.created_at));
    });
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("'{value}' is not a YYYY-MM-DD or RFC 3339 date"))
}
