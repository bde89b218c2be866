//! A company's verdict on a pending request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use donahub_core::AppError;
use donahub_entity::request::RequestStatus;

/// Outcome of [`WorkflowService::decide`](super::WorkflowService::decide).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Accept the request and reserve the material.
    Approve,
    /// Decline the request.
    Reject,
}

impl Decision {
    /// Status the request moves to.
    pub fn target(&self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for Decision {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" | "approved" | "aprobar" => Ok(Self::Approve),
            "reject" | "rejected" | "rechazar" => Ok(Self::Reject),
            _ => Err(AppError::validation(format!("Invalid decision: '{s}'"))),
        }
    }
}
