//! Domain events emitted by DonaHub operations.
//!
//! The workflow and catalog return events describing each state change.
//! Events carry every id and label needed downstream, so the notification
//! rules can derive recipients without re-reading the store (the material
//! may already be gone by then).

pub mod material;
pub mod request;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

pub use material::MaterialEvent;
pub use request::{RejectionReason, RequestEvent, RequestParties};

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event.
    pub actor_id: UserId,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum EventPayload {
    /// A material-related event.
    Material(MaterialEvent),
    /// A request-related event.
    Request(RequestEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: UserId, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Create a request event.
    pub fn request(actor_id: UserId, event: RequestEvent) -> Self {
        Self::new(actor_id, EventPayload::Request(event))
    }

    /// Create a material event.
    pub fn material(actor_id: UserId, event: MaterialEvent) -> Self {
        Self::new(actor_id, EventPayload::Material(event))
    }

    /// Short dotted name for logging, e.g. `request.approved`.
    pub fn name(&self) -> &'static str {
        match &self.payload {
            EventPayload::Material(e) => e.name(),
            EventPayload::Request(e) => e.name(),
        }
    }
}
