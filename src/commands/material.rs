//! Material catalog CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::context::AppContext;
use crate::output;
use donahub_core::error::AppError;
use donahub_core::types::{MaterialId, PageRequest};
use donahub_entity::material::{
    CreateMaterial, Location, Material, MaterialCategory, MaterialCondition, MaterialStatus,
    PickupSchedule, UpdateMaterial,
};
use donahub_service::MaterialFilter;

/// Arguments for material commands
#[derive(Debug, Args)]
pub struct MaterialArgs {
    /// Material subcommand
    #[command(subcommand)]
    pub command: MaterialCommand,
}

/// Pickup site options shared by publish and update.
#[derive(Debug, Args)]
pub struct SiteArgs {
    /// Street address of the pickup site
    #[arg(long)]
    pub address: Option<String>,
    /// City of the pickup site
    #[arg(long)]
    pub city: Option<String>,
    /// On-site contact person
    #[arg(long)]
    pub contact: Option<String>,
    /// On-site contact phone
    #[arg(long)]
    pub contact_phone: Option<String>,
    /// Pickup weekdays, comma separated
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<String>,
    /// Pickup window start, HH:MM
    #[arg(long)]
    pub start: Option<String>,
    /// Pickup window end, HH:MM
    #[arg(long)]
    pub end: Option<String>,
    /// Access notes for the driver
    #[arg(long)]
    pub instructions: Option<String>,
}

impl SiteArgs {
    fn location(&self) -> Option<Location> {
        if self.address.is_none() && self.city.is_none() {
            return None;
        }
        Some(Location {
            address: self.address.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
            coordinates: None,
            contact_person: self.contact.clone().unwrap_or_default(),
            contact_phone: self.contact_phone.clone().unwrap_or_default(),
        })
    }

    fn schedule(&self) -> Option<PickupSchedule> {
        let schedule = PickupSchedule {
            days: self.days.clone(),
            start_time: self.start.clone(),
            end_time: self.end.clone(),
            special_instructions: self.instructions.clone(),
        };
        (schedule != PickupSchedule::default()).then_some(schedule)
    }
}

/// Material subcommands
#[derive(Debug, Subcommand)]
pub enum MaterialCommand {
    /// Browse available materials
    List {
        /// Only this pickup city
        #[arg(long)]
        city: Option<String>,
        /// Only this category
        #[arg(long)]
        category: Option<MaterialCategory>,
        /// Search title and description
        #[arg(short, long)]
        query: Option<String>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Items per page
        #[arg(long, default_value_t = 25)]
        page_size: u64,
    },
    /// Materials published by the logged-in company
    Mine,
    /// Available materials in the logged-in volunteer's zones
    Zone,
    /// Show one material
    Show {
        /// Material ID
        id: MaterialId,
    },
    /// Publish a new material
    Publish {
        /// Title
        #[arg(long)]
        title: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Category
        #[arg(long, default_value = "other")]
        category: MaterialCategory,
        /// Quantity
        #[arg(long)]
        quantity: u32,
        /// Unit of the quantity
        #[arg(long)]
        unit: String,
        /// Condition
        #[arg(long, default_value = "good")]
        condition: MaterialCondition,
        /// Image references, repeatable
        #[arg(long = "image")]
        images: Vec<String>,
        /// Pickup site
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Edit an owned material
    Update {
        /// Material ID
        id: MaterialId,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<MaterialCategory>,
        /// New quantity
        #[arg(long)]
        quantity: Option<u32>,
        /// New unit
        #[arg(long)]
        unit: Option<String>,
        /// New condition
        #[arg(long)]
        condition: Option<MaterialCondition>,
        /// New pickup site
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Change the status of an owned material
    Status {
        /// Material ID
        id: MaterialId,
        /// available, reserved, delivered or cancelled
        status: MaterialStatus,
    },
    /// Delete an owned material
    Delete {
        /// Material ID
        id: MaterialId,
    },
}

/// Material display row for table output
#[derive(Debug, Serialize, Tabled)]
struct MaterialRow {
    /// Material ID
    id: String,
    /// Title
    title: String,
    /// Category
    category: String,
    /// Quantity with unit
    quantity: String,
    /// Pickup city
    city: String,
    /// Status
    status: String,
    /// Published at
    published: String,
}

impl From<&Material> for MaterialRow {
    fn from(m: &Material) -> Self {
        Self {
            id: m.id.to_string(),
            title: m.title.clone(),
            category: m.category.to_string(),
            quantity: format!("{} {}", m.quantity, m.unit),
            city: m.pickup_location.city.clone(),
            status: m.status.to_string(),
            published: output::timestamp(&m.created_at),
        }
    }
}

fn rows(materials: &[Material]) -> Vec<MaterialRow> {
    materials.iter().map(MaterialRow::from).collect()
}

/// Execute material commands
pub async fn execute(args: &MaterialArgs, ctx: &AppContext) -> Result<(), AppError> {
    let catalog = &ctx.services.catalog;

    match &args.command {
        MaterialCommand::List {
            city,
            category,
            query,
            page,
            page_size,
        } => {
            let filter = MaterialFilter {
                city: city.clone(),
                category: *category,
                query: query.clone(),
            };
            let page = catalog.list_available(&filter, &PageRequest::new(*page, *page_size));
            output::print_list(&rows(&page.items), ctx.format);
            if page.has_next {
                output::print_warning(&format!(
                    "Page {} of {} ({} materials)",
                    page.page, page.total_pages, page.total_items
                ));
            }
        }
        MaterialCommand::Mine => {
            let principal = ctx.principal().await?;
            output::print_list(&rows(&catalog.list_owned(&principal)?), ctx.format);
        }
        MaterialCommand::Zone => {
            let principal = ctx.principal().await?;
            output::print_list(&rows(&catalog.list_for_volunteer(&principal)?), ctx.format);
        }
        MaterialCommand::Show { id } => {
            print_material(&catalog.get(*id)?, ctx);
        }
        MaterialCommand::Publish {
            title,
            description,
            category,
            quantity,
            unit,
            condition,
            images,
            site,
        } => {
            let principal = ctx.principal().await?;
            let location = site.location().ok_or_else(|| {
                AppError::validation("A pickup address and city are required")
            })?;
            let material = catalog.publish(
                &principal,
                CreateMaterial {
                    title: title.clone(),
                    description: description.clone(),
                    category: *category,
                    quantity: *quantity,
                    unit: unit.clone(),
                    condition: *condition,
                    images: images.clone(),
                    pickup_location: location,
                    pickup_schedule: site.schedule().unwrap_or_default(),
                },
            )?;
            ctx.save().await?;
            output::print_success(&format!("Published '{}' ({})", material.title, material.id));
        }
        MaterialCommand::Update {
            id,
            title,
            description,
            category,
            quantity,
            unit,
            condition,
            site,
        } => {
            let principal = ctx.principal().await?;
            let material = catalog.update(
                &principal,
                *id,
                UpdateMaterial {
                    title: title.clone(),
                    description: description.clone(),
                    category: *category,
                    quantity: *quantity,
                    unit: unit.clone(),
                    condition: *condition,
                    images: None,
                    pickup_location: site.location(),
                    pickup_schedule: site.schedule(),
                },
            )?;
            ctx.save().await?;
            output::print_success(&format!("Updated '{}'", material.title));
        }
        MaterialCommand::Status { id, status } => {
            let principal = ctx.principal().await?;
            let material = catalog.set_status(&principal, *id, *status)?;
            ctx.save().await?;
            output::print_success(&format!("'{}' is now {}", material.title, material.status));
        }
        MaterialCommand::Delete { id } => {
            let principal = ctx.principal().await?;
            let removed = catalog.delete(&principal, *id)?;
            ctx.save().await?;
            output::print_success(&format!("Deleted '{}'", removed.title));
        }
    }

    Ok(())
}

fn print_material(material: &Material, ctx: &AppContext) {
    output::print_item(material, ctx.format, |m| {
        let location = &m.pickup_location;
        let schedule = &m.pickup_schedule;
        output::print_kv("ID", &m.id.to_string());
        output::print_kv("Title", &m.title);
        output::print_kv("Description", &m.description);
        output::print_kv("Category", m.category.as_str());
        output::print_kv("Quantity", &format!("{} {}", m.quantity, m.unit));
        output::print_kv("Condition", m.condition.as_str());
        output::print_kv("Status", m.status.as_str());
        output::print_kv(
            "Pickup",
            &format!("{}, {}", location.address, location.city),
        );
        if !location.contact_person.is_empty() {
            output::print_kv(
                "Contact",
                &format!("{} {}", location.contact_person, location.contact_phone),
            );
        }
        if !schedule.days.is_empty() {
            output::print_kv("Days", &schedule.days.join(", "));
        }
        if let (Some(start), Some(end)) = (&schedule.start_time, &schedule.end_time) {
            output::print_kv("Hours", &format!("{start} - {end}"));
        }
        output::print_kv("Published", &output::timestamp(&m.created_at));
    });
}
