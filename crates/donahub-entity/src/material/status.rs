//! Material status and its lifecycle edges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a listed material.
///
/// `available → reserved → delivered`, and `available | reserved →
/// cancelled`. Delivered and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialStatus {
    /// Open for requests.
    #[serde(alias = "disponible")]
    Available,
    /// Claimed by an approved request.
    #[serde(alias = "reservado")]
    Reserved,
    /// Handed over to the NGO.
    #[serde(alias = "entregado")]
    Delivered,
    /// Withdrawn by the company.
    #[serde(alias = "cancelado")]
    Cancelled,
}

impl MaterialStatus {
    /// Whether `self → next` is a legal edge.
    pub fn can_transition_to(&self, next: MaterialStatus) -> bool {
        matches!(
            (self, next),
            (Self::Available, Self::Reserved)
                | (Self::Reserved, Self::Delivered)
                | (Self::Available | Self::Reserved, Self::Cancelled)
        )
    }

    /// Whether no further edge leaves this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaterialStatus {
    type Err = donahub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" | "disponible" => Ok(Self::Available),
            "reserved" | "reservado" => Ok(Self::Reserved),
            "delivered" | "entregado" => Ok(Self::Delivered),
            "cancelled" | "canceled" | "cancelado" => Ok(Self::Cancelled),
            _ => Err(donahub_core::AppError::validation(format!(
                "Invalid material status: '{s}'. Expected one of: available, reserved, delivered, cancelled"
            ))),
        }
    }
}
