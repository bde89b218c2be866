//! Request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use donahub_core::AppResult;
use donahub_core::error::AppError;
use donahub_core::types::{MaterialId, RequestId, UserId};

use super::status::RequestStatus;

/// One NGO's claim on one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Unique request identifier.
    pub id: RequestId,
    /// The claimed material.
    pub material_id: MaterialId,
    /// The requesting NGO.
    #[serde(alias = "ong_id")]
    pub ngo_id: UserId,
    /// Volunteer coordinating transport.
    #[serde(default)]
    pub volunteer_id: Option<UserId>,
    /// The NGO's message to the company.
    pub message: String,
    /// Workflow status.
    pub status: RequestStatus,
    /// Agreed pickup date.
    #[serde(default)]
    pub pickup_date: Option<DateTime<Utc>>,
    /// Transport arrangements.
    #[serde(default)]
    pub transport_notes: Option<String>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// Last modification.
    pub updated_at: DateTime<Utc>,
}

impl Request {
    /// Create a pending request.
    pub fn new(material_id: MaterialId, ngo_id: UserId, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: RequestId::new(),
            material_id,
            ngo_id,
            volunteer_id: None,
            message: message.into(),
            status: RequestStatus::Pending,
            pickup_date: None,
            transport_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move along one edge of the workflow graph.
    pub fn transition(&mut self, next: RequestStatus) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(format!(
                "Request '{}' cannot move from {} to {next}",
                self.id, self.status
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether `user_id` is the assigned volunteer.
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.volunteer_id == Some(user_id)
    }
}
