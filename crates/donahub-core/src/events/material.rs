//! Material catalog events.

use serde::{Deserialize, Serialize};

use crate::types::{MaterialId, UserId};

/// Events related to material listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialEvent {
    /// A company published a new material.
    Published {
        /// The material.
        material_id: MaterialId,
        /// The owning company.
        company_id: UserId,
        /// Material title.
        title: String,
    },
    /// The owner edited the listing.
    Updated {
        /// The material.
        material_id: MaterialId,
        /// The owning company.
        company_id: UserId,
        /// Material title after the edit.
        title: String,
        /// NGOs holding active requests on it.
        interested_ngos: Vec<UserId>,
    },
    /// The owner reserved the material outside the approval flow.
    Reserved {
        /// The material.
        material_id: MaterialId,
        /// The owning company.
        company_id: UserId,
        /// Material title.
        title: String,
        /// NGOs whose requests are still pending.
        pending_ngos: Vec<UserId>,
    },
    /// The material was delivered.
    Delivered {
        /// The material.
        material_id: MaterialId,
        /// The owning company.
        company_id: UserId,
    },
    /// The listing was cancelled.
    Cancelled {
        /// The material.
        material_id: MaterialId,
        /// The owning company.
        company_id: UserId,
    },
    /// The listing was deleted.
    Deleted {
        /// The material.
        material_id: MaterialId,
        /// The owning company.
        company_id: UserId,
    },
}

impl MaterialEvent {
    /// Short dotted name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Published { .. } => "material.published",
            Self::Updated { .. } => "material.updated",
            Self::Reserved { .. } => "material.reserved",
            Self::Delivered { .. } => "material.delivered",
            Self::Cancelled { .. } => "material.cancelled",
            Self::Deleted { .. } => "material.deleted",
        }
    }
}
