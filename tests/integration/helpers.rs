//! Shared test helpers for integration tests.

use std::sync::Arc;

use donahub_auth::{MemorySessionStore, Principal, RegisterRequest};
use donahub_core::config::{AppConfig, RemovalPolicy, SiblingPolicy};
use donahub_core::types::{MaterialId, UserId};
use donahub_entity::material::{
    CreateMaterial, Location, Material, MaterialCategory, MaterialCondition, PickupSchedule,
};
use donahub_entity::notification::{Notification, NotificationKind};
use donahub_entity::request::Request;
use donahub_entity::user::{User, UserRole};
use donahub_service::Services;
use donahub_store::EntityStore;

/// Test application with a company, two NGOs and a Madrid volunteer
/// registered over an in-memory store.
pub struct TestApp {
    /// All services over one store
    pub services: Services,
    /// Owner of every material the helpers publish
    pub company: Principal,
    /// A second company that owns nothing
    pub other_company: Principal,
    /// First NGO
    pub ngo: Principal,
    /// Second NGO
    pub other_ngo: Principal,
    /// Volunteer covering Madrid
    pub volunteer: Principal,
}

impl TestApp {
    /// Create a test application with default policies
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given policies
    pub fn with_policies(sibling: SiblingPolicy, removal: RemovalPolicy) -> Self {
        let mut config = AppConfig::default();
        config.workflow.sibling_policy = sibling;
        config.workflow.removal_policy = removal;
        Self::with_config(config)
    }

    /// Create a test application from a full configuration
    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(EntityStore::new());
        let services = Services::new(&config, store, Arc::new(MemorySessionStore::new()));

        let company = register(&services, "obra@abc.es", UserRole::Company, Some("Constructora ABC"));
        let other_company =
            register(&services, "obra@xyz.es", UserRole::Company, Some("Reformas XYZ"));
        let ngo = register(&services, "info@fundacionx.org", UserRole::Ngo, Some("Fundación X"));
        let other_ngo = register(&services, "hola@techo.org", UserRole::Ngo, Some("Techo Digno"));
        let volunteer = register(&services, "carlos@correo.es", UserRole::Volunteer, None);

        Self {
            services,
            company,
            other_company,
            ngo,
            other_ngo,
            volunteer,
        }
    }

    /// Shared store
    pub fn store(&self) -> &EntityStore {
        &self.services.store
    }

    /// Publish a material in `city` as the main company
    pub fn publish(&self, title: &str, city: &str) -> Material {
        self.services
            .catalog
            .publish(&self.company, material_data(title, city))
            .expect("publish material")
    }

    /// Submit a request as `ngo`
    pub fn submit(&self, ngo: &Principal, material_id: MaterialId) -> Request {
        self.services
            .workflow
            .submit(ngo, material_id, "Necesitamos ladrillos")
            .expect("submit request")
    }

    /// Notifications of `user_id`, newest first
    pub fn notifications_of(&self, user_id: UserId) -> Vec<Notification> {
        self.services.notifications.for_user(user_id)
    }

    /// Notifications of `user_id` with the given kind
    pub fn notifications_of_kind(&self, user_id: UserId, kind: NotificationKind) -> Vec<Notification> {
        self.notifications_of(user_id)
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }

    /// Total stored notifications
    pub fn notification_total(&self) -> usize {
        self.store().count(|_: &Notification| true)
    }
}

/// Valid material input
pub fn material_data(title: &str, city: &str) -> CreateMaterial {
    CreateMaterial {
        title: title.to_string(),
        description: "Sobrante de obra en buen estado".to_string(),
        category: MaterialCategory::Bricks,
        quantity: 500,
        unit: "unidades".to_string(),
        condition: MaterialCondition::Good,
        images: Vec::new(),
        pickup_location: Location {
            address: "Calle Mayor 123".to_string(),
            city: city.to_string(),
            coordinates: None,
            contact_person: "Carlos Ruiz".to_string(),
            contact_phone: "+34 600 111 222".to_string(),
        },
        pickup_schedule: PickupSchedule {
            days: vec!["lunes".to_string(), "viernes".to_string()],
            start_time: Some("08:00".to_string()),
            end_time: Some("17:00".to_string()),
            special_instructions: None,
        },
    }
}

fn register(
    services: &Services,
    email: &str,
    role: UserRole,
    organization: Option<&str>,
) -> Principal {
    let user: User = services
        .auth
        .register(RegisterRequest {
            email: email.to_string(),
            name: "Persona de contacto".to_string(),
            role,
            organization: organization.map(String::from),
            phone: None,
            vehicle_type: (role == UserRole::Volunteer).then(|| "furgoneta".to_string()),
            coverage_zones: if role == UserRole::Volunteer {
                vec!["Madrid Centro".to_string(), "Madrid Norte".to_string()]
            } else {
                Vec::new()
            },
            skills: Vec::new(),
        })
        .expect("register user");
    Principal::from_user(&user)
}
