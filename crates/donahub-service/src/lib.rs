//! # donahub-service
//!
//! Business logic for DonaHub. Each service works against the shared
//! [`EntityStore`](donahub_store::EntityStore) and takes the acting
//! [`Principal`](donahub_auth::Principal) explicitly.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod activity;
pub mod catalog;
pub mod container;
pub mod notification;
pub mod workflow;

mod support;

pub use activity::{
    ActivityFeed, ActivityItem, ActivityKind, CategoryShare, CityImpact, DashboardCounters,
    DashboardService, DashboardSummary, ImpactReport, MonthlyDonations,
};
pub use catalog::{CatalogService, MaterialFilter};
pub use container::Services;
pub use notification::{
    NotificationDraft, NotificationFormatter, NotificationRules, NotificationService,
};
pub use workflow::{Decision, WorkflowService};
