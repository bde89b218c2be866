//! The authenticated actor.

use serde::{Deserialize, Serialize};

use donahub_core::types::UserId;
use donahub_entity::user::{User, UserRole};

/// Who is performing an operation.
///
/// Built from a stored [`User`] by the gateway and passed explicitly to
/// every service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The acting user.
    pub user_id: UserId,
    /// Role at the time of resolution.
    pub role: UserRole,
    /// Contact name.
    pub name: String,
    /// Company or NGO name.
    pub organization: Option<String>,
}

impl Principal {
    /// Build a principal for a stored user.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            name: user.name.clone(),
            organization: user.organization.clone(),
        }
    }

    /// Organization name if any, else the contact name.
    pub fn display_name(&self) -> &str {
        self.organization.as_deref().unwrap_or(&self.name)
    }

    /// Whether the actor is a company.
    pub fn is_company(&self) -> bool {
        self.role == UserRole::Company
    }

    /// Whether the actor is an NGO.
    pub fn is_ngo(&self) -> bool {
        self.role == UserRole::Ngo
    }

    /// Whether the actor is a volunteer.
    pub fn is_volunteer(&self) -> bool {
        self.role == UserRole::Volunteer
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::from_user(user)
    }
}
