//! Per-role dashboard counters.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use donahub_auth::Principal;
use donahub_core::AppResult;
use donahub_entity::material::{Material, MaterialStatus};
use donahub_entity::request::{Request, RequestStatus};
use donahub_entity::user::{User, UserRole};
use donahub_store::EntityStore;

use super::impact::ImpactReport;
use crate::notification::NotificationService;

/// Counters shown on a dashboard, by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardCounters {
    /// A company's materials and incoming requests.
    Company {
        /// Materials ever published.
        published: usize,
        /// Currently available.
        available: usize,
        /// Currently reserved.
        reserved: usize,
        /// Delivered.
        delivered: usize,
        /// Pending requests on own materials.
        pending_requests: usize,
    },
    /// An NGO's requests.
    Ngo {
        /// Requests ever sent.
        total_requests: usize,
        /// Waiting for a decision.
        pending: usize,
        /// Approved and not yet completed.
        in_progress: usize,
        /// Completed.
        completed: usize,
        /// Materials open for requests.
        available_materials: usize,
    },
    /// A volunteer's transports.
    Volunteer {
        /// Assigned or in transit.
        active_assignments: usize,
        /// Completed deliveries.
        completed_deliveries: usize,
        /// Available materials in the coverage zones.
        materials_in_zone: usize,
    },
}

/// A principal's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Display name of the user.
    pub name: String,
    /// Unread notification count.
    pub unread_notifications: usize,
    /// Role specific counters.
    pub counters: DashboardCounters,
}

/// Computes dashboard summaries.
#[derive(Debug, Clone)]
pub struct DashboardService {
    store: Arc<EntityStore>,
    notifications: Arc<NotificationService>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(store: Arc<EntityStore>, notifications: Arc<NotificationService>) -> Self {
        Self {
            store,
            notifications,
        }
    }

    /// Counters for the principal's role.
    pub fn summary(&self, principal: &Principal) -> AppResult<DashboardSummary> {
        let user: User = self.store.get(principal.user_id)?;
        let counters = match user.role {
            UserRole::Company => self.company(&user),
            UserRole::Ngo => self.ngo(&user),
            UserRole::Volunteer => self.volunteer(&user),
        };
        debug!(user_id = %user.id, ?counters, "Computed dashboard");
        Ok(DashboardSummary {
            name: user.display_name().to_string(),
            unread_notifications: self.notifications.unread_count(user.id),
            counters,
        })
    }

    /// Impact of every donation on the platform, visible to any user.
    pub fn impact(&self) -> ImpactReport {
        let report = ImpactReport::compute(
            &self.store.all::<Material>(),
            &self.store.all::<Request>(),
        );
        debug!(
            delivered = report.materials_delivered,
            projects = report.projects_helped,
            "Computed impact report"
        );
        report
    }

    fn company(&self, user: &User) -> DashboardCounters {
        let owned = self.store.list(|m: &Material| m.company_id == user.id);
        let with_status =
            |status: MaterialStatus| owned.iter().filter(|m| m.status == status).count();
        let pending_requests = self.store.count(|r: &Request| {
            r.status == RequestStatus::Pending && owned.iter().any(|m| m.id == r.material_id)
        });
        DashboardCounters::Company {
            published: owned.len(),
            available: with_status(MaterialStatus::Available),
            reserved: with_status(MaterialStatus::Reserved),
            delivered: with_status(MaterialStatus::Delivered),
            pending_requests,
        }
    }

    fn ngo(&self, user: &User) -> DashboardCounters {
        let mine = self.store.list(|r: &Request| r.ngo_id == user.id);
        DashboardCounters::Ngo {
            total_requests: mine.len(),
            pending: mine
                .iter()
                .filter(|r| r.status == RequestStatus::Pending)
                .count(),
            in_progress: mine.iter().filter(|r| r.status.is_in_progress()).count(),
            completed: mine
                .iter()
                .filter(|r| r.status == RequestStatus::Completed)
                .count(),
            available_materials: self.store.count(Material::is_available),
        }
    }

    fn volunteer(&self, user: &User) -> DashboardCounters {
        let assigned = self.store.list(|r: &Request| r.is_assigned_to(user.id));
        DashboardCounters::Volunteer {
            active_assignments: assigned
                .iter()
                .filter(|r| {
                    matches!(
                        r.status,
                        RequestStatus::AssignedToVolunteer | RequestStatus::InTransit
                    )
                })
                .count(),
            completed_deliveries: assigned
                .iter()
                .filter(|r| r.status == RequestStatus::Completed)
                .count(),
            materials_in_zone: self.store.count(|m: &Material| {
                m.is_available() && user.covers_city(&m.pickup_location.city)
            }),
        }
    }
}
