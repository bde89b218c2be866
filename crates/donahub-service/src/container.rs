//! Wiring of every service over one store.

use std::sync::Arc;

use donahub_auth::{AuthGateway, RbacEnforcer, SessionStore};
use donahub_core::config::AppConfig;
use donahub_store::EntityStore;

use crate::activity::{ActivityFeed, DashboardService};
use crate::catalog::CatalogService;
use crate::notification::NotificationService;
use crate::workflow::WorkflowService;

/// All services sharing one [`EntityStore`].
#[derive(Debug, Clone)]
pub struct Services {
    /// The shared store.
    pub store: Arc<EntityStore>,
    /// Login and principal resolution.
    pub auth: AuthGateway,
    /// Notification dispatcher.
    pub notifications: Arc<NotificationService>,
    /// Material catalog.
    pub catalog: CatalogService,
    /// Request workflow.
    pub workflow: WorkflowService,
    /// Activity feed.
    pub activity: ActivityFeed,
    /// Role dashboards.
    pub dashboard: DashboardService,
}

impl Services {
    /// Build every service from configuration.
    pub fn new(
        config: &AppConfig,
        store: Arc<EntityStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let rbac = RbacEnforcer::new();
        let notifications = Arc::new(NotificationService::new(
            Arc::clone(&store),
            rbac.clone(),
            &config.notifications,
        ));
        Self {
            auth: AuthGateway::new(Arc::clone(&store), sessions),
            catalog: CatalogService::new(
                Arc::clone(&store),
                Arc::clone(&notifications),
                rbac.clone(),
                config.workflow.clone(),
            ),
            workflow: WorkflowService::new(
                Arc::clone(&store),
                Arc::clone(&notifications),
                rbac,
                config.workflow.clone(),
            ),
            activity: ActivityFeed::new(Arc::clone(&store)),
            dashboard: DashboardService::new(Arc::clone(&store), Arc::clone(&notifications)),
            notifications,
            store,
        }
    }
}
