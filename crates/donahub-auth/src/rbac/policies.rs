//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use donahub_entity::user::UserRole;

/// A role-level capability. Ownership of the target record is checked
/// separately by each service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// List new materials.
    PublishMaterial,
    /// Edit, reserve, cancel or delete own materials.
    ManageOwnMaterial,
    /// Ask for a material.
    SubmitRequest,
    /// Approve or reject requests on own materials.
    DecideRequest,
    /// Put a volunteer on an approved request.
    AssignVolunteer,
    /// Move a request through transport.
    TransportDelivery,
    /// Browse the catalog.
    BrowseCatalog,
    /// Read and manage own notifications.
    ReadNotifications,
}

/// Mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<UserRole, HashSet<Permission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use Permission::*;

        let mut policies = HashMap::new();
        policies.insert(
            UserRole::Company,
            [
                PublishMaterial,
                ManageOwnMaterial,
                DecideRequest,
                AssignVolunteer,
                BrowseCatalog,
                ReadNotifications,
            ]
            .into_iter()
            .collect(),
        );
        policies.insert(
            UserRole::Ngo,
            [SubmitRequest, BrowseCatalog, ReadNotifications]
                .into_iter()
                .collect(),
        );
        // Volunteers may assign themselves.
        policies.insert(
            UserRole::Volunteer,
            [
                AssignVolunteer,
                TransportDelivery,
                BrowseCatalog,
                ReadNotifications,
            ]
            .into_iter()
            .collect(),
        );

        Self { policies }
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: UserRole) -> HashSet<Permission> {
        self.policies.get(&role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: UserRole, permission: Permission) -> bool {
        self.policies
            .get(&role)
            .is_some_and(|perms| perms.contains(&permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
