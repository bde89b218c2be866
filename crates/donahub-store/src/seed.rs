//! Demo data set.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use donahub_core::AppResult;
use donahub_core::error::AppError;
use donahub_core::types::{MaterialId, RequestId, UserId};
use donahub_entity::material::{
    Coordinates, Location, Material, MaterialCategory, MaterialCondition, MaterialStatus,
    PickupSchedule,
};
use donahub_entity::notification::{Notification, NotificationKind};
use donahub_entity::request::{Request, RequestStatus};
use donahub_entity::user::{User, UserRole, VolunteerProfile};

use crate::store::EntityStore;

/// Ids of the seeded demo records.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DemoAccounts {
    /// Constructora ABC.
    pub company: UserId,
    /// Fundación Construir Futuro.
    pub ngo: UserId,
    /// Carlos Mendoza, covering Madrid.
    pub volunteer: UserId,
    /// The bricks in Madrid, with a pending request.
    pub bricks: MaterialId,
    /// The pending request on the bricks.
    pub pending_request: RequestId,
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Install the demo data set into an empty store.
pub fn seed_demo(store: &EntityStore) -> AppResult<DemoAccounts> {
    store.transaction(|store| {
        if !store.is_empty() {
            return Err(AppError::conflict(
                "Demo data can only be seeded into an empty store",
            ));
        }

        let company = User {
            id: UserId::new(),
            email: "constructora@ejemplo.com".into(),
            name: "Juan Pérez".into(),
            role: UserRole::Company,
            organization: Some("Constructora ABC".into()),
            phone: Some("+34 600 123 456".into()),
            volunteer: None,
            created_at: at(2024, 1, 15, 10, 0),
        };
        let ngo = User {
            id: UserId::new(),
            email: "ong@ejemplo.com".into(),
            name: "María García".into(),
            role: UserRole::Ngo,
            organization: Some("Fundación Construir Futuro".into()),
            phone: Some("+34 600 789 012".into()),
            volunteer: None,
            created_at: at(2024, 1, 20, 14, 30),
        };
        let volunteer = User {
            id: UserId::new(),
            email: "voluntario@ejemplo.com".into(),
            name: "Carlos Mendoza".into(),
            role: UserRole::Volunteer,
            organization: None,
            phone: Some("+34 600 345 678".into()),
            volunteer: Some(VolunteerProfile {
                vehicle_type: Some("furgoneta".into()),
                coverage_zones: strings(&["Madrid Centro", "Madrid Norte", "Madrid Sur"]),
                skills: strings(&["Transporte", "Coordinación", "Carga/Descarga"]),
            }),
            created_at: at(2024, 1, 25, 9, 15),
        };

        let bricks = demo_material(
            company.id,
            "Ladrillos de demolición",
            "Ladrillos en buen estado de demolición de edificio residencial. \
             Aproximadamente 500 unidades disponibles.",
            MaterialCategory::Bricks,
            (500, "unidades"),
            MaterialCondition::Good,
            Location {
                address: "Calle Mayor 123".into(),
                city: "Madrid".into(),
                coordinates: Some(Coordinates {
                    lat: 40.4168,
                    lng: -3.7038,
                }),
                contact_person: "Carlos Ruiz".into(),
                contact_phone: "+34 600 111 222".into(),
            },
            PickupSchedule {
                days: strings(&["lunes", "martes", "miércoles", "jueves", "viernes"]),
                start_time: Some("08:00".into()),
                end_time: Some("17:00".into()),
                special_instructions: Some(
                    "Acceso por la entrada lateral. Traer vehículo de carga.".into(),
                ),
            },
            at(2024, 12, 9, 9, 0),
        );
        let beams = demo_material(
            company.id,
            "Vigas de madera",
            "Vigas de madera maciza de roble, 3 metros de longitud. \
             Ideales para proyectos de construcción sostenible.",
            MaterialCategory::Wood,
            (15, "piezas"),
            MaterialCondition::Excellent,
            Location {
                address: "Avenida de la Construcción 45".into(),
                city: "Barcelona".into(),
                coordinates: Some(Coordinates {
                    lat: 41.3851,
                    lng: 2.1734,
                }),
                contact_person: "Ana López".into(),
                contact_phone: "+34 600 333 444".into(),
            },
            PickupSchedule {
                days: strings(&["lunes", "miércoles", "viernes"]),
                start_time: Some("09:00".into()),
                end_time: Some("16:00".into()),
                special_instructions: Some(
                    "Coordinar con 24h de antelación. Grúa disponible en obra.".into(),
                ),
            },
            at(2024, 12, 8, 14, 30),
        );
        let pipes = demo_material(
            company.id,
            "Tubería de PVC",
            "Tubería de PVC de diferentes diámetros (110mm, 160mm). \
             Sobrante de instalación de saneamiento.",
            MaterialCategory::Piping,
            (200, "metros"),
            MaterialCondition::Good,
            Location {
                address: "Polígono Industrial Norte, Nave 7".into(),
                city: "Valencia".into(),
                coordinates: Some(Coordinates {
                    lat: 39.4699,
                    lng: -0.3763,
                }),
                contact_person: "Miguel Torres".into(),
                contact_phone: "+34 600 555 666".into(),
            },
            PickupSchedule {
                days: strings(&["martes", "jueves"]),
                start_time: Some("10:00".into()),
                end_time: Some("15:00".into()),
                special_instructions: Some(
                    "Entrada por portón principal. Preguntar por el encargado de obra.".into(),
                ),
            },
            at(2024, 12, 7, 11, 15),
        );

        let requested_at = at(2024, 12, 9, 15, 30);
        let request = Request {
            id: RequestId::new(),
            material_id: bricks.id,
            ngo_id: ngo.id,
            volunteer_id: None,
            message: "Necesitamos estos ladrillos para un proyecto de vivienda social. \
                      ¿Podríamos coordinar la recogida para el miércoles?"
                .into(),
            status: RequestStatus::Pending,
            pickup_date: None,
            transport_notes: None,
            created_at: requested_at,
            updated_at: requested_at,
        };

        let ids = json!({ "request_id": request.id, "material_id": bricks.id });
        let notifications = [
            demo_notification(
                company.id,
                NotificationKind::NewRequest,
                "Nueva solicitud de material",
                "Fundación Construir Futuro ha solicitado tus ladrillos de demolición",
                ids.clone(),
                false,
                requested_at,
            ),
            demo_notification(
                ngo.id,
                NotificationKind::RequestApproved,
                "Solicitud aprobada",
                "Tu solicitud de ladrillos de demolición ha sido aprobada por Constructora ABC",
                ids,
                false,
                at(2024, 12, 9, 16, 0),
            ),
            demo_notification(
                ngo.id,
                NotificationKind::PickupReminder,
                "Recordatorio de recogida",
                "Recuerda recoger los ladrillos aprobados antes del viernes",
                json!({ "material_id": bricks.id }),
                true,
                at(2024, 12, 8, 10, 0),
            ),
        ];

        let accounts = DemoAccounts {
            company: company.id,
            ngo: ngo.id,
            volunteer: volunteer.id,
            bricks: bricks.id,
            pending_request: request.id,
        };

        store.put(company);
        store.put(ngo);
        store.put(volunteer);
        store.put(bricks);
        store.put(beams);
        store.put(pipes);
        store.put(request);
        for notification in notifications {
            store.put(notification);
        }

        info!(company = %accounts.company, ngo = %accounts.ngo, "Seeded demo data");
        Ok(accounts)
    })
}

#[allow(clippy::too_many_arguments)]
fn demo_material(
    company_id: UserId,
    title: &str,
    description: &str,
    category: MaterialCategory,
    (quantity, unit): (u32, &str),
    condition: MaterialCondition,
    pickup_location: Location,
    pickup_schedule: PickupSchedule,
    created_at: DateTime<Utc>,
) -> Material {
    Material {
        id: MaterialId::new(),
        title: title.into(),
        description: description.into(),
        category,
        quantity,
        unit: unit.into(),
        condition,
        images: Vec::new(),
        company_id,
        pickup_location,
        pickup_schedule,
        status: MaterialStatus::Available,
        created_at,
        updated_at: created_at,
    }
}

fn demo_notification(
    user_id: UserId,
    kind: NotificationKind,
    title: &str,
    message: &str,
    payload: serde_json::Value,
    read: bool,
    created_at: DateTime<Utc>,
) -> Notification {
    Notification {
        read,
        created_at,
        ..Notification::new(user_id, kind, title, message, Some(payload))
    }
}
