//! Request status and the workflow graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of an NGO's request.
///
/// ```text
/// pending ──► approved ──► assigned_to_volunteer ──► in_transit ──► completed
///    │            └──────────────────────────────────────────────────►┘
///    └──► rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Waiting for the company's decision.
    #[serde(alias = "pendiente")]
    Pending,
    /// Accepted by the company.
    #[serde(alias = "aprobada")]
    Approved,
    /// A volunteer will transport the material.
    #[serde(alias = "asignada_voluntario")]
    AssignedToVolunteer,
    /// Material on its way.
    #[serde(alias = "en_transporte")]
    InTransit,
    /// Declined, terminal.
    #[serde(alias = "rechazada")]
    Rejected,
    /// Delivered, terminal.
    #[serde(alias = "completada")]
    Completed,
}

impl RequestStatus {
    /// Whether `self → next` is an edge of the workflow graph.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::AssignedToVolunteer | Self::Completed)
                | (Self::AssignedToVolunteer, Self::InTransit)
                | (Self::InTransit, Self::Completed)
        )
    }

    /// Rejected and completed requests never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    /// A non-terminal request still claims its material.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Past the approval step but not finished.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            Self::Approved | Self::AssignedToVolunteer | Self::InTransit
        )
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::AssignedToVolunteer => "assigned_to_volunteer",
            Self::InTransit => "in_transit",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = donahub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" | "pendiente" => Ok(Self::Pending),
            "approved" | "aprobada" => Ok(Self::Approved),
            "assigned_to_volunteer" | "assigned" | "asignada_voluntario" => {
                Ok(Self::AssignedToVolunteer)
            }
            "in_transit" | "en_transporte" => Ok(Self::InTransit),
            "rejected" | "rechazada" => Ok(Self::Rejected),
            "completed" | "completada" => Ok(Self::Completed),
            _ => Err(donahub_core::AppError::validation(format!(
                "Invalid request status: '{s}'"
            ))),
        }
    }
}
