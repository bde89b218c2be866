//! Recipient resolution: which users hear about which event.

use std::sync::Arc;

use donahub_core::events::{DomainEvent, EventPayload, MaterialEvent, RequestEvent, RequestParties};
use donahub_core::types::UserId;
use donahub_entity::user::User;
use donahub_store::EntityStore;

use super::formatter::{NotificationDraft, NotificationFormatter};

/// Maps domain events to notification drafts. The actor of an event never
/// receives a notification about it.
#[derive(Debug, Clone)]
pub struct NotificationRules {
    store: Arc<EntityStore>,
}

impl NotificationRules {
    /// Creates a new rules engine reading names from `store`.
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    /// Drafts for every recipient of `event`.
    pub fn drafts_for(&self, event: &DomainEvent) -> Vec<NotificationDraft> {
        let drafts = match &event.payload {
            EventPayload::Request(e) => self.request_drafts(e),
            EventPayload::Material(e) => Self::material_drafts(e),
        };
        drafts
            .into_iter()
            .filter(|d| d.user_id != event.actor_id)
            .collect()
    }

    fn request_drafts(&self, event: &RequestEvent) -> Vec<NotificationDraft> {
        let p = event.parties();
        match event {
            RequestEvent::Submitted(_) => {
                vec![NotificationFormatter::new_request(
                    p.company_id,
                    &self.name_of(p.ngo_id),
                    p,
                )]
            }
            RequestEvent::Approved(_) => {
                vec![NotificationFormatter::request_approved(
                    p.ngo_id,
                    &self.name_of(p.company_id),
                    p,
                )]
            }
            RequestEvent::Rejected { reason, .. } => {
                vec![NotificationFormatter::request_rejected(p.ngo_id, p, *reason)]
            }
            RequestEvent::VolunteerAssigned(_) => {
                let volunteer = p.volunteer_id.map(|v| self.name_of(v)).unwrap_or_default();
                involved(p)
                    .map(|to| NotificationFormatter::volunteer_assigned(to, &volunteer, p))
                    .collect()
            }
            RequestEvent::InTransit(_) => involved(p)
                .map(|to| NotificationFormatter::in_transit(to, p))
                .collect(),
            RequestEvent::Completed(_) => involved(p)
                .map(|to| NotificationFormatter::completed(to, p))
                .collect(),
            RequestEvent::PickupScheduled { pickup_date, .. } => involved(p)
                .map(|to| NotificationFormatter::pickup_scheduled(to, p, *pickup_date))
                .collect(),
            RequestEvent::PickupReminder(_) => {
                vec![NotificationFormatter::pickup_reminder(p.ngo_id, p)]
            }
        }
    }

    fn material_drafts(event: &MaterialEvent) -> Vec<NotificationDraft> {
        match event {
            MaterialEvent::Updated {
                material_id,
                title,
                interested_ngos,
                ..
            } => interested_ngos
                .iter()
                .map(|ngo| NotificationFormatter::material_updated(*ngo, *material_id, title))
                .collect(),
            MaterialEvent::Reserved {
                material_id,
                title,
                pending_ngos,
                ..
            } => pending_ngos
                .iter()
                .map(|ngo| NotificationFormatter::material_reserved(*ngo, *material_id, title))
                .collect(),
            MaterialEvent::Published { .. }
            | MaterialEvent::Delivered { .. }
            | MaterialEvent::Cancelled { .. }
            | MaterialEvent::Deleted { .. } => Vec::new(),
        }
    }

    fn name_of(&self, user_id: UserId) -> String {
        self.store
            .find::<User>(user_id)
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Un usuario".to_string())
    }
}

/// Volunteer, NGO and company of a request, in that order.
fn involved(p: &RequestParties) -> impl Iterator<Item = UserId> + '_ {
    p.volunteer_id
        .into_iter()
        .chain([p.ngo_id, p.company_id])
}
