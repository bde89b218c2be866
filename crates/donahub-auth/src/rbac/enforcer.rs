//! RBAC enforcement logic.

use donahub_core::AppResult;
use donahub_core::error::AppError;

use super::policies::{Permission, RbacPolicies};
use crate::principal::Principal;

/// Checks whether a principal's role grants a permission.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Returns `Ok(())` if allowed, or an `Authorization` error if denied.
    pub fn require(&self, principal: &Principal, permission: Permission) -> AppResult<()> {
        if self.policies.has_permission(principal.role, permission) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{}' does not have permission '{permission:?}'",
                principal.role
            )))
        }
    }

    /// Whether the principal's role has the permission.
    pub fn allows(&self, principal: &Principal, permission: Permission) -> bool {
        self.policies.has_permission(principal.role, permission)
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}
