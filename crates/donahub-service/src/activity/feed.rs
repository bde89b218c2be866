//! Recent platform activity derived from current records.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use donahub_core::types::{MaterialId, UserId};
use donahub_entity::material::{Material, MaterialStatus};
use donahub_entity::request::{Request, RequestStatus};
use donahub_entity::user::User;
use donahub_store::EntityStore;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A company published a material.
    MaterialCreated,
    /// An NGO sent a request.
    RequestSent,
    /// A request was approved (and may have moved on since).
    RequestApproved,
    /// A request was rejected.
    RequestRejected,
    /// A material was delivered.
    MaterialDelivered,
}

/// One line of the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityItem {
    /// What happened.
    pub kind: ActivityKind,
    /// Human-readable summary.
    pub message: String,
    /// Who did it.
    pub actor_id: UserId,
    /// The material involved.
    pub material_id: MaterialId,
    /// Pickup city of the material.
    pub city: String,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

/// Builds the activity feed from the store.
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    store: Arc<EntityStore>,
}

impl ActivityFeed {
    /// Creates a feed over `store`.
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    /// The `limit` most recent items, newest first.
    pub fn recent(&self, limit: usize) -> Vec<ActivityItem> {
        let materials = self.store.all::<Material>();
        let mut items = Vec::new();

        for m in &materials {
            items.push(item(
                ActivityKind::MaterialCreated,
                format!("{} publicó \"{}\"", self.name_of(m.company_id), m.title),
                m.company_id,
                m,
                m.created_at,
            ));
            if m.status == MaterialStatus::Delivered {
                items.push(item(
                    ActivityKind::MaterialDelivered,
                    format!("Material \"{}\" entregado", m.title),
                    m.company_id,
                    m,
                    m.updated_at,
                ));
            }
        }

        for r in self.store.all::<Request>() {
            let Some(m) = materials.iter().find(|m| m.id == r.material_id) else {
                continue;
            };
            items.push(item(
                ActivityKind::RequestSent,
                format!("{} solicitó \"{}\"", self.name_of(r.ngo_id), m.title),
                r.ngo_id,
                m,
                r.created_at,
            ));
            match r.status {
                RequestStatus::Approved
                | RequestStatus::AssignedToVolunteer
                | RequestStatus::InTransit
                | RequestStatus::Completed => items.push(item(
                    ActivityKind::RequestApproved,
                    format!("Solicitud aprobada para \"{}\"", m.title),
                    m.company_id,
                    m,
                    r.updated_at,
                )),
                RequestStatus::Rejected => items.push(item(
                    ActivityKind::RequestRejected,
                    format!("Solicitud rechazada para \"{}\"", m.title),
                    m.company_id,
                    m,
                    r.updated_at,
                )),
                RequestStatus::Pending => {}
            }
        }

        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items.truncate(limit);
        items
    }

    fn name_of(&self, user_id: UserId) -> String {
        self.store
            .find::<User>(user_id)
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Un usuario".to_string())
    }
}

fn item(
    kind: ActivityKind,
    message: String,
    actor_id: UserId,
    material: &Material,
    timestamp: DateTime<Utc>,
) -> ActivityItem {
    ActivityItem {
        kind,
        message,
        actor_id,
        material_id: material.id,
        city: material.pickup_location.city.clone(),
        timestamp,
    }
}
