//! Request workflow policy configuration.

use serde::{Deserialize, Serialize};

/// Policies the request workflow and material catalog enforce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// What happens to other pending requests when one is approved.
    #[serde(default)]
    pub sibling_policy: SiblingPolicy,
    /// What happens to requests when their material is deleted or cancelled.
    #[serde(default)]
    pub removal_policy: RemovalPolicy,
}

/// Handling of sibling pending requests once a material is claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingPolicy {
    /// Reject every other pending request on the material and notify its NGO.
    #[default]
    AutoReject,
    /// Leave siblings pending; the company rejects them explicitly.
    KeepPending,
}

/// Handling of requests when a material is deleted or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Refuse while any active request references the material.
    #[default]
    Forbid,
    /// Reject pending requests; still refuse while one is approved or further along.
    CascadeReject,
}
