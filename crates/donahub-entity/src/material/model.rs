//! Material entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use donahub_core::AppResult;
use donahub_core::error::AppError;
use donahub_core::types::{MaterialId, UserId};

use super::category::{MaterialCategory, MaterialCondition};
use super::location::{Location, PickupSchedule};
use super::status::MaterialStatus;

/// A quantity of surplus construction goods offered by one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique material identifier.
    pub id: MaterialId,
    /// Short listing title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Kind of material.
    pub category: MaterialCategory,
    /// Amount offered, in `unit`s.
    pub quantity: u32,
    /// Unit of `quantity` (pieces, metres, ...).
    pub unit: String,
    /// State of the goods.
    pub condition: MaterialCondition,
    /// Image paths.
    #[serde(default)]
    pub images: Vec<String>,
    /// The owning company.
    #[serde(alias = "empresa_id")]
    pub company_id: UserId,
    /// Pickup site.
    #[serde(alias = "obra_location")]
    pub pickup_location: Location,
    /// Pickup hours.
    #[serde(default)]
    pub pickup_schedule: PickupSchedule,
    /// Lifecycle status.
    pub status: MaterialStatus,
    /// When the listing was published.
    pub created_at: DateTime<Utc>,
    /// Last modification.
    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Create an available listing owned by `company_id`.
    pub fn new(company_id: UserId, data: CreateMaterial) -> Self {
        let now = Utc::now();
        Self {
            id: MaterialId::new(),
            title: data.title.trim().to_string(),
            description: data.description,
            category: data.category,
            quantity: data.quantity,
            unit: data.unit.trim().to_string(),
            condition: data.condition,
            images: data.images,
            company_id,
            pickup_location: data.pickup_location,
            pickup_schedule: data.pickup_schedule,
            status: MaterialStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` owns this material.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.company_id == user_id
    }

    /// Whether the material is open for requests.
    pub fn is_available(&self) -> bool {
        self.status == MaterialStatus::Available
    }

    /// Move to `next`, failing on any edge outside the material lifecycle.
    pub fn transition(&mut self, next: MaterialStatus) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(format!(
                "Material '{}' cannot move from {} to {next}",
                self.id, self.status
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Apply an owner edit. Fields left `None` keep their value.
    pub fn apply(&mut self, update: UpdateMaterial) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = update.unit {
            self.unit = unit.trim().to_string();
        }
        if let Some(condition) = update.condition {
            self.condition = condition;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(location) = update.pickup_location {
            self.pickup_location = location;
        }
        if let Some(schedule) = update.pickup_schedule {
            self.pickup_schedule = schedule;
        }
        self.updated_at = Utc::now();
    }
}

/// Data required to publish a material.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMaterial {
    /// Short listing title.
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Kind of material.
    pub category: MaterialCategory,
    /// Amount offered.
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: u32,
    /// Unit of `quantity`.
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    /// State of the goods.
    pub condition: MaterialCondition,
    /// Image paths.
    #[serde(default)]
    pub images: Vec<String>,
    /// Pickup site.
    #[validate(nested)]
    pub pickup_location: Location,
    /// Pickup hours.
    #[serde(default)]
    pub pickup_schedule: PickupSchedule,
}

/// Owner edit of an existing listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMaterial {
    /// New title.
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<MaterialCategory>,
    /// New quantity.
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: Option<u32>,
    /// New unit.
    #[validate(length(min = 1, message = "Unit cannot be empty"))]
    pub unit: Option<String>,
    /// New condition.
    pub condition: Option<MaterialCondition>,
    /// Replacement image list.
    pub images: Option<Vec<String>>,
    /// New pickup site.
    #[validate(nested)]
    pub pickup_location: Option<Location>,
    /// New pickup hours.
    pub pickup_schedule: Option<PickupSchedule>,
}
