//! Registration, login and principal resolution.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use donahub_core::AppResult;
use donahub_core::error::AppError;
use donahub_entity::user::{CreateUser, User, UserRole, VolunteerProfile};
use donahub_store::EntityStore;

use crate::principal::Principal;
use crate::session::SessionStore;

/// Self-service sign-up data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Contact person's name.
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    /// Chosen role.
    pub role: UserRole,
    /// Company or NGO name. Required for those roles.
    #[serde(default)]
    pub organization: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Volunteer vehicle.
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Volunteer coverage zones.
    #[serde(default)]
    pub coverage_zones: Vec<String>,
    /// Volunteer skills.
    #[serde(default)]
    pub skills: Vec<String>,
}

impl RegisterRequest {
    fn check(&self) -> AppResult<()> {
        self.validate()?;
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        match self.role {
            UserRole::Company | UserRole::Ngo => {
                let has_org = self
                    .organization
                    .as_deref()
                    .is_some_and(|o| !o.trim().is_empty());
                if !has_org {
                    return Err(AppError::validation(format!(
                        "Organization name is required for role '{}'",
                        self.role
                    )));
                }
            }
            UserRole::Volunteer => {
                if !self.coverage_zones.iter().any(|z| !z.trim().is_empty()) {
                    return Err(AppError::validation(
                        "Volunteers must cover at least one zone",
                    ));
                }
            }
        }
        Ok(())
    }

    fn into_create_user(self) -> CreateUser {
        let volunteer = (self.role == UserRole::Volunteer).then(|| VolunteerProfile {
            vehicle_type: self.vehicle_type,
            coverage_zones: self
                .coverage_zones
                .into_iter()
                .map(|z| z.trim().to_string())
                .filter(|z| !z.is_empty())
                .collect(),
            skills: self.skills,
        });
        CreateUser {
            email: self.email,
            name: self.name,
            role: self.role,
            organization: self.organization.map(|o| o.trim().to_string()),
            phone: self.phone,
            volunteer,
        }
    }
}

/// Front door for identity: owns the session and resolves principals.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    store: Arc<EntityStore>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthGateway {
    /// Creates a gateway over the given store and session backend.
    pub fn new(store: Arc<EntityStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { store, sessions }
    }

    /// Find a user by email, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let email = email.trim().to_lowercase();
        self.store
            .list(|u: &User| u.email.to_lowercase() == email)
            .into_iter()
            .next()
    }

    /// Create an account. Does not log in.
    pub fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.check()?;
        let user = request.into_create_user().into_user();

        self.store.transaction(|store| {
            let email = user.email.to_lowercase();
            if store.count(|u: &User| u.email.to_lowercase() == email) > 0 {
                warn!(email = %user.email, "Registration with existing email");
                return Err(AppError::conflict(format!(
                    "Email '{}' is already registered",
                    user.email
                )));
            }
            store.put(user.clone());
            Ok(())
        })?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Log in by email and remember the user in the session.
    pub async fn login(&self, email: &str) -> AppResult<User> {
        let user = self.find_by_email(email).ok_or_else(|| {
            warn!(email, "Login with unknown email");
            AppError::authentication(format!("No account for '{}'", email.trim()))
        })?;
        self.sessions.save(&user).await?;
        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(user)
    }

    /// The logged-in user, re-read from the store.
    ///
    /// A session naming a user the store no longer knows resolves to
    /// `None`.
    pub async fn current(&self) -> AppResult<Option<User>> {
        let Some(session_user) = self.sessions.load().await? else {
            return Ok(None);
        };
        let user = self.store.find::<User>(session_user.id);
        if user.is_none() {
            warn!(user_id = %session_user.id, "Session refers to unknown user");
        }
        Ok(user)
    }

    /// The logged-in principal, or an `Authentication` error.
    pub async fn require_current(&self) -> AppResult<Principal> {
        self.current()
            .await?
            .map(|user| Principal::from_user(&user))
            .ok_or_else(|| AppError::authentication("Not logged in"))
    }

    /// End the session.
    pub async fn logout(&self) -> AppResult<()> {
        self.sessions.clear().await?;
        info!("User logged out");
        Ok(())
    }
}
