//! Notification message formatting.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use donahub_core::events::{RejectionReason, RequestParties};
use donahub_core::types::{MaterialId, UserId};
use donahub_entity::notification::NotificationKind;

/// A notification ready to be stored for one recipient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationDraft {
    /// Recipient.
    pub user_id: UserId,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Related ids.
    pub payload: Option<serde_json::Value>,
}

impl NotificationDraft {
    fn new(
        user_id: UserId,
        kind: NotificationKind,
        title: &str,
        message: String,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: title.to_string(),
            message,
            payload: Some(payload),
        }
    }
}

fn request_payload(parties: &RequestParties) -> serde_json::Value {
    json!({
        "request_id": parties.request_id,
        "material_id": parties.material_id,
    })
}

fn material_payload(material_id: MaterialId) -> serde_json::Value {
    json!({ "material_id": material_id })
}

/// Formats notification messages for workflow and catalog events.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// A company received a request.
    pub fn new_request(to: UserId, ngo_name: &str, parties: &RequestParties) -> NotificationDraft {
        NotificationDraft::new(
            to,
            NotificationKind::NewRequest,
            "Nueva solicitud de material",
            format!("{ngo_name} ha solicitado \"{}\"", parties.material_title),
            request_payload(parties),
        )
    }

    /// An NGO's request was approved.
    pub fn request_approved(
        to: UserId,
        company_name: &str,
        parties: &RequestParties,
    ) -> NotificationDraft {
        NotificationDraft::new(
            to,
            NotificationKind::RequestApproved,
            "Solicitud aprobada",
            format!(
                "Tu solicitud de \"{}\" ha sido aprobada por {company_name}",
                parties.material_title
            ),
            request_payload(parties),
        )
    }

    /// An NGO's request was rejected.
    pub fn request_rejected(
        to: UserId,
        parties: &RequestParties,
        reason: RejectionReason,
    ) -> NotificationDraft {
        let title = &parties.material_title;
        let message = match reason {
            RejectionReason::Declined => {
                format!("Tu solicitud de \"{title}\" ha sido rechazada")
            }
            RejectionReason::MaterialClaimed => {
                format!("\"{title}\" ha sido asignado a otra organización")
            }
            RejectionReason::MaterialWithdrawn => {
                format!("\"{title}\" ya no está disponible")
            }
        };
        NotificationDraft::new(
            to,
            NotificationKind::RequestRejected,
            "Solicitud rechazada",
            message,
            json!({
                "request_id": parties.request_id,
                "material_id": parties.material_id,
                "reason": reason,
            }),
        )
    }

    /// A volunteer took over transport.
    pub fn volunteer_assigned(
        to: UserId,
        volunteer_name: &str,
        parties: &RequestParties,
    ) -> NotificationDraft {
        NotificationDraft::new(
            to,
            NotificationKind::VolunteerAssigned,
            "Voluntario asignado",
            format!(
                "{volunteer_name} se encargará del transporte de \"{}\"",
                parties.material_title
            ),
            request_payload(parties),
        )
    }

    /// The material left the pickup site.
    pub fn in_transit(to: UserId, parties: &RequestParties) -> NotificationDraft {
        NotificationDraft::new(
            to,
            NotificationKind::RequestInTransit,
            "Material en camino",
            format!("\"{}\" está en transporte", parties.material_title),
            request_payload(parties),
        )
    }

    /// The material reached the NGO.
    pub fn completed(to: UserId, parties: &RequestParties) -> NotificationDraft {
        NotificationDraft::new(
            to,
            NotificationKind::RequestCompleted,
            "Entrega completada",
            format!("\"{}\" ha sido entregado", parties.material_title),
            request_payload(parties),
        )
    }

    /// Pickup date or transport notes changed.
    pub fn pickup_scheduled(
        to: UserId,
        parties: &RequestParties,
        pickup_date: Option<DateTime<Utc>>,
    ) -> NotificationDraft {
        let message = match pickup_date {
            Some(date) => format!(
                "La recogida de \"{}\" está programada para el {}",
                parties.material_title,
                date.format("%d/%m/%Y %H:%M")
            ),
            None => format!(
                "Se han actualizado los detalles de transporte de \"{}\"",
                parties.material_title
            ),
        };
        NotificationDraft::new(
            to,
            NotificationKind::PickupReminder,
            "Recogida programada",
            message,
            request_payload(parties),
        )
    }

    /// The company asks the NGO to collect.
    pub fn pickup_reminder(to: UserId, parties: &RequestParties) -> NotificationDraft {
        NotificationDraft::new(
            to,
            NotificationKind::PickupReminder,
            "Recordatorio de recogida",
            format!("Recuerda recoger \"{}\"", parties.material_title),
            request_payload(parties),
        )
    }

    /// A material the NGO asked for was edited.
    pub fn material_updated(to: UserId, material_id: MaterialId, title: &str) -> NotificationDraft {
        NotificationDraft::new(
            to,
            NotificationKind::MaterialUpdated,
            "Material actualizado",
            format!("\"{title}\", que has solicitado, ha sido actualizado"),
            material_payload(material_id),
        )
    }

    /// A material the NGO asked for was reserved by its owner.
    pub fn material_reserved(to: UserId, material_id: MaterialId, title: &str) -> NotificationDraft {
        NotificationDraft::new(
            to,
            NotificationKind::MaterialReserved,
            "Material reservado",
            format!("\"{title}\" ha sido reservado por la empresa"),
            material_payload(material_id),
        )
    }
}
