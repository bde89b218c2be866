//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use donahub_core::types::UserId;

use super::role::UserRole;

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login email, unique ignoring case.
    pub email: String,
    /// Contact person's name.
    pub name: String,
    /// Participant role.
    pub role: UserRole,
    /// Company or NGO name.
    #[serde(default, alias = "company")]
    pub organization: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Transport details, volunteers only.
    #[serde(default)]
    pub volunteer: Option<VolunteerProfile>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// What a volunteer can carry and where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerProfile {
    /// Vehicle available for transport (van, truck, ...).
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Zones the volunteer covers, e.g. "Madrid Centro".
    #[serde(default)]
    pub coverage_zones: Vec<String>,
    /// Free-form skills.
    #[serde(default)]
    pub skills: Vec<String>,
}

impl VolunteerProfile {
    /// Whether any coverage zone covers `city`.
    ///
    /// A zone covers a city when it names it exactly (ignoring case) or
    /// names a district of it: "Madrid Norte" covers "Madrid".
    pub fn covers(&self, city: &str) -> bool {
        let city = city.trim().to_lowercase();
        if city.is_empty() {
            return false;
        }
        self.coverage_zones.iter().any(|zone| {
            let zone = zone.trim().to_lowercase();
            zone == city
                || zone
                    .strip_prefix(city.as_str())
                    .is_some_and(|rest| rest.starts_with(' '))
        })
    }
}

impl User {
    /// Name shown to other participants: the organization if any.
    pub fn display_name(&self) -> &str {
        self.organization.as_deref().unwrap_or(&self.name)
    }

    /// Whether this user is a company.
    pub fn is_company(&self) -> bool {
        self.role == UserRole::Company
    }

    /// Whether this user is an NGO.
    pub fn is_ngo(&self) -> bool {
        self.role == UserRole::Ngo
    }

    /// Whether this user is a volunteer.
    pub fn is_volunteer(&self) -> bool {
        self.role == UserRole::Volunteer
    }

    /// Whether this volunteer covers `city`. Always false for other roles.
    pub fn covers_city(&self, city: &str) -> bool {
        self.volunteer
            .as_ref()
            .is_some_and(|profile| profile.covers(city))
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Contact person's name.
    pub name: String,
    /// Participant role.
    pub role: UserRole,
    /// Company or NGO name.
    pub organization: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Volunteer transport details.
    pub volunteer: Option<VolunteerProfile>,
}

impl CreateUser {
    /// Build the stored record with a fresh id.
    pub fn into_user(self) -> User {
        let volunteer = match self.role {
            UserRole::Volunteer => Some(self.volunteer.unwrap_or_default()),
            _ => None,
        };
        User {
            id: UserId::new(),
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            role: self.role,
            organization: self.organization,
            phone: self.phone,
            volunteer,
            created_at: Utc::now(),
        }
    }
}
