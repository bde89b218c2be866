//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three kinds of participant on the platform.
///
/// A role is fixed when the account is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A construction company offering surplus material.
    #[serde(alias = "empresa")]
    Company,
    /// An NGO requesting material for its projects.
    #[serde(alias = "ong")]
    Ngo,
    /// A volunteer transporting material between the two.
    #[serde(alias = "voluntario")]
    Volunteer,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Ngo => "ngo",
            Self::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = donahub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "company" | "empresa" => Ok(Self::Company),
            "ngo" | "ong" => Ok(Self::Ngo),
            "volunteer" | "voluntario" => Ok(Self::Volunteer),
            _ => Err(donahub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: company, ngo, volunteer"
            ))),
        }
    }
}
