//! Helpers shared by the services.

use chrono::{DateTime, Utc};
use tracing::debug;

use donahub_auth::Principal;
use donahub_core::AppResult;
use donahub_core::error::AppError;
use donahub_core::events::{DomainEvent, RejectionReason, RequestEvent, RequestParties};
use donahub_core::types::{RequestId, UserId};
use donahub_entity::material::Material;
use donahub_entity::request::{Request, RequestStatus};
use donahub_store::EntityStore;

/// Sort newest first; records with equal timestamps keep the later insert
/// first. `items` must be in insertion order.
pub(crate) fn newest_first<T, F>(mut items: Vec<T>, stamp: F) -> Vec<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    items.reverse();
    items.sort_by_key(|item| std::cmp::Reverse(stamp(item)));
    items
}

/// Everyone a request event touches.
pub(crate) fn parties(request: &Request, material: &Material) -> RequestParties {
    RequestParties {
        request_id: request.id,
        material_id: material.id,
        material_title: material.title.clone(),
        ngo_id: request.ngo_id,
        company_id: material.company_id,
        volunteer_id: request.volunteer_id,
    }
}

/// Fail with `Authorization` unless the principal owns the material.
pub(crate) fn ensure_material_owner(principal: &Principal, material: &Material) -> AppResult<()> {
    if material.is_owned_by(principal.user_id) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "Material '{}' belongs to another company",
            material.id
        )))
    }
}

/// Reject every pending request on a claimed material except `keep`.
/// Must run inside a store transaction.
pub(crate) fn reject_pending_claims(
    store: &EntityStore,
    material: &Material,
    keep: Option<RequestId>,
    actor: UserId,
) -> AppResult<Vec<DomainEvent>> {
    let pending = store.list(|r: &Request| {
        r.material_id == material.id
            && Some(r.id) != keep
            && r.status == RequestStatus::Pending
    });
    let mut events = Vec::with_capacity(pending.len());
    for mut request in pending {
        request.transition(RequestStatus::Rejected)?;
        store.put(request.clone());
        debug!(request_id = %request.id, "Auto-rejected request on claimed material");
        events.push(DomainEvent::request(
            actor,
            RequestEvent::Rejected {
                parties: parties(&request, material),
                reason: RejectionReason::MaterialClaimed,
            },
        ));
    }
    Ok(events)
}
