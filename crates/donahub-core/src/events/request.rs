//! Request workflow events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MaterialId, RequestId, UserId};

/// Everyone and everything a request event touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParties {
    /// The request.
    pub request_id: RequestId,
    /// The claimed material.
    pub material_id: MaterialId,
    /// Material title at the time of the event.
    pub material_title: String,
    /// The requesting NGO.
    pub ngo_id: UserId,
    /// The company owning the material.
    pub company_id: UserId,
    /// The assigned volunteer, if any.
    pub volunteer_id: Option<UserId>,
}

/// Why a request ended up rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The company declined it.
    Declined,
    /// Another request on the same material was approved.
    MaterialClaimed,
    /// The material was deleted or cancelled.
    MaterialWithdrawn,
}

/// Events related to the request lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestEvent {
    /// An NGO submitted a request.
    Submitted(RequestParties),
    /// The owning company approved a request.
    Approved(RequestParties),
    /// A request was rejected.
    Rejected {
        /// Request participants.
        parties: RequestParties,
        /// Why it was rejected.
        reason: RejectionReason,
    },
    /// A volunteer was assigned to transport the material.
    VolunteerAssigned(RequestParties),
    /// The material left the pickup site.
    InTransit(RequestParties),
    /// The material reached the NGO.
    Completed(RequestParties),
    /// Pickup date or transport notes changed.
    PickupScheduled {
        /// Request participants.
        parties: RequestParties,
        /// The agreed pickup date.
        pickup_date: Option<DateTime<Utc>>,
    },
    /// The company reminded the NGO to pick up.
    PickupReminder(RequestParties),
}

impl RequestEvent {
    /// Participants of the event.
    pub fn parties(&self) -> &RequestParties {
        match self {
            Self::Submitted(p)
            | Self::Approved(p)
            | Self::VolunteerAssigned(p)
            | Self::InTransit(p)
            | Self::Completed(p)
            | Self::PickupReminder(p) => p,
            Self::Rejected { parties, .. } | Self::PickupScheduled { parties, .. } => parties,
        }
    }

    /// Short dotted name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submitted(_) => "request.submitted",
            Self::Approved(_) => "request.approved",
            Self::Rejected { .. } => "request.rejected",
            Self::VolunteerAssigned(_) => "request.volunteer_assigned",
            Self::InTransit(_) => "request.in_transit",
            Self::Completed(_) => "request.completed",
            Self::PickupScheduled { .. } => "request.pickup_scheduled",
            Self::PickupReminder(_) => "request.pickup_reminder",
        }
    }
}
