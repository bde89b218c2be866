//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A company received a request on one of its materials.
    NewRequest,
    /// An NGO's request was approved.
    RequestApproved,
    /// An NGO's request was rejected.
    RequestRejected,
    /// A volunteer was assigned to a request.
    VolunteerAssigned,
    /// The material left the pickup site.
    RequestInTransit,
    /// The material was delivered.
    RequestCompleted,
    /// A requested material listing changed.
    MaterialUpdated,
    /// A requested material was reserved by its owner.
    MaterialReserved,
    /// Pickup reminder.
    PickupReminder,
    /// Platform message.
    SystemMessage,
}

impl NotificationKind {
    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewRequest => "new_request",
            Self::RequestApproved => "request_approved",
            Self::RequestRejected => "request_rejected",
            Self::VolunteerAssigned => "volunteer_assigned",
            Self::RequestInTransit => "request_in_transit",
            Self::RequestCompleted => "request_completed",
            Self::MaterialUpdated => "material_updated",
            Self::MaterialReserved => "material_reserved",
            Self::PickupReminder => "pickup_reminder",
            Self::SystemMessage => "system_message",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
