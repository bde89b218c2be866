//! Dashboard and activity feed commands.

use serde::Serialize;
use tabled::Tabled;

use crate::context::AppContext;
use crate::output;
use donahub_core::error::AppError;
use donahub_service::{ActivityItem, ActivityKind, DashboardCounters, ImpactReport};

/// Activity display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ActivityRow {
    /// When
    when: String,
    /// What happened
    kind: String,
    /// Summary
    message: String,
    /// Pickup city
    city: String,
}

impl From<&ActivityItem> for ActivityRow {
    fn from(item: &ActivityItem) -> Self {
        let kind = match item.kind {
            ActivityKind::MaterialCreated => "material",
            ActivityKind::RequestSent => "request",
            ActivityKind::RequestApproved => "approved",
            ActivityKind::RequestRejected => "rejected",
            ActivityKind::MaterialDelivered => "delivered",
        };
        Self {
            when: output::timestamp(&item.timestamp),
            kind: kind.to_string(),
            message: item.message.clone(),
            city: item.city.clone(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    category: String,
    materials: usize,
    share: String,
}

#[derive(Debug, Serialize, Tabled)]
struct CityRow {
    city: String,
    projects: usize,
    organizations: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct MonthRow {
    month: String,
    published: usize,
    completed: usize,
}

fn print_impact_tables(report: &ImpactReport) {
    let categories: Vec<CategoryRow> = report
        .material_distribution
        .iter()
        .map(|c| CategoryRow {
            category: c.category.to_string(),
            materials: c.materials,
            share: format!("{}%", c.percentage),
        })
        .collect();
    let cities: Vec<CityRow> = report
        .geographic_impact
        .iter()
        .map(|c| CityRow {
            city: c.city.clone(),
            projects: c.projects,
            organizations: c.organizations,
        })
        .collect();
    let months: Vec<MonthRow> = report
        .monthly_donations
        .iter()
        .map(|m| MonthRow {
            month: m.month.clone(),
            published: m.published,
            completed: m.completed,
        })
        .collect();

    println!("\nDelivered materials by category");
    output::print_list(&categories, output::OutputFormat::Table);
    println!("\nImpact by city");
    output::print_list(&cities, output::OutputFormat::Table);
    println!("\nMonthly donations");
    output::print_list(&months, output::OutputFormat::Table);
}

/// Show the logged-in user's dashboard
pub async fn dashboard(ctx: &AppContext) -> Result<(), AppError> {
    let principal = ctx.principal().await?;
    let summary = ctx.services.dashboard.summary(&principal)?;

    output::print_item(&summary, ctx.format, |s| {
        output::print_kv("User", &s.name);
        output::print_kv("Unread notifications", &s.unread_notifications.to_string());
        match &s.counters {
            DashboardCounters::Company {
                published,
                available,
                reserved,
                delivered,
                pending_requests,
            } => {
                output::print_kv("Published", &published.to_string());
                output::print_kv("Available", &available.to_string());
                output::print_kv("Reserved", &reserved.to_string());
                output::print_kv("Delivered", &delivered.to_string());
                output::print_kv("Pending requests", &pending_requests.to_string());
            }
            DashboardCounters::Ngo {
                total_requests,
                pending,
                in_progress,
                completed,
                available_materials,
            } => {
                output::print_kv("Requests", &total_requests.to_string());
                output::print_kv("Pending", &pending.to_string());
                output::print_kv("In progress", &in_progress.to_string());
                output::print_kv("Completed", &completed.to_string());
                output::print_kv("Available materials", &available_materials.to_string());
            }
            DashboardCounters::Volunteer {
                active_assignments,
                completed_deliveries,
                materials_in_zone,
            } => {
                output::print_kv("Active assignments", &active_assignments.to_string());
                output::print_kv("Completed deliveries", &completed_deliveries.to_string());
                output::print_kv("Materials in zone", &materials_in_zone.to_string());
            }
        }
    });
    Ok(())
}

/// Show recent platform activity
pub fn activity(limit: usize, ctx: &AppContext) -> Result<(), AppError> {
    let rows: Vec<ActivityRow> = ctx
        .services
        .activity
        .recent(limit)
        .iter()
        .map(ActivityRow::from)
        .collect();
    output::print_list(&rows, ctx.format);
    Ok(())
}

/// Show platform-wide donation impact
pub fn impact(ctx: &AppContext) -> Result<(), AppError> {
    let report = ctx.services.dashboard.impact();
    output::print_item(&report, ctx.format, |r| {
        output::print_kv("Materials published", &r.materials_published.to_string());
        output::print_kv("Materials delivered", &r.materials_delivered.to_string());
        output::print_kv("Projects helped", &r.projects_helped.to_string());
        output::print_kv("Organizations helped", &r.organizations_helped.to_string());
        print_impact_tables(r);
    });
    Ok(())
}
