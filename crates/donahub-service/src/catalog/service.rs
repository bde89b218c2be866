//! Material catalog service.

use std::sync::Arc;

use chrono::NaiveTime;
use tracing::{debug, info, warn};
use validator::Validate;

use donahub_auth::{Permission, Principal, RbacEnforcer};
use donahub_core::AppResult;
use donahub_core::config::{RemovalPolicy, SiblingPolicy, WorkflowConfig};
use donahub_core::error::AppError;
use donahub_core::events::{DomainEvent, MaterialEvent, RejectionReason, RequestEvent};
use donahub_core::types::{MaterialId, PageRequest, PageResponse, UserId};
use donahub_entity::material::{
    CreateMaterial, Location, Material, MaterialStatus, PickupSchedule, UpdateMaterial,
};
use donahub_entity::request::{Request, RequestStatus};
use donahub_entity::user::User;
use donahub_store::EntityStore;

use super::filter::MaterialFilter;
use crate::notification::NotificationService;
use crate::support::{ensure_material_owner, newest_first, parties, reject_pending_claims};

/// Publishing, browsing and owner management of materials.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<EntityStore>,
    notifications: Arc<NotificationService>,
    rbac: RbacEnforcer,
    policies: WorkflowConfig,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(
        store: Arc<EntityStore>,
        notifications: Arc<NotificationService>,
        rbac: RbacEnforcer,
        policies: WorkflowConfig,
    ) -> Self {
        Self {
            store,
            notifications,
            rbac,
            policies,
        }
    }

    /// Available materials matching `filter`, newest first, one page.
    pub fn list_available(
        &self,
        filter: &MaterialFilter,
        page: &PageRequest,
    ) -> PageResponse<Material> {
        let matched = self
            .store
            .list(|m: &Material| m.is_available() && filter.matches(m));
        debug!(total = matched.len(), "Listed available materials");
        PageResponse::paginate(newest_first(matched, |m| m.created_at), page)
    }

    /// Available materials in the volunteer's coverage zones.
    pub fn list_for_volunteer(&self, principal: &Principal) -> AppResult<Vec<Material>> {
        self.rbac.require(principal, Permission::TransportDelivery)?;
        let volunteer: User = self.store.get(principal.user_id)?;
        let matched = self.store.list(|m: &Material| {
            m.is_available() && volunteer.covers_city(&m.pickup_location.city)
        });
        Ok(newest_first(matched, |m| m.created_at))
    }

    /// The company's own materials in any status.
    pub fn list_owned(&self, principal: &Principal) -> AppResult<Vec<Material>> {
        self.rbac.require(principal, Permission::ManageOwnMaterial)?;
        let owner = principal.user_id;
        let owned = self.store.list(|m: &Material| m.company_id == owner);
        Ok(newest_first(owned, |m| m.created_at))
    }

    /// One material by id.
    pub fn get(&self, id: MaterialId) -> AppResult<Material> {
        self.store.get(id)
    }

    /// List a new material as available.
    pub fn publish(&self, principal: &Principal, data: CreateMaterial) -> AppResult<Material> {
        self.rbac.require(principal, Permission::PublishMaterial)?;
        data.validate()?;
        require_text("Title", &data.title)?;
        require_text("Unit", &data.unit)?;
        validate_location(&data.pickup_location)?;
        validate_schedule(&data.pickup_schedule)?;

        let material = Material::new(principal.user_id, data);
        self.store.put(material.clone());
        info!(
            material_id = %material.id,
            company_id = %material.company_id,
            city = %material.pickup_location.city,
            "Material published"
        );

        self.notifications.dispatch(&DomainEvent::material(
            principal.user_id,
            MaterialEvent::Published {
                material_id: material.id,
                company_id: material.company_id,
                title: material.title.clone(),
            },
        ));
        Ok(material)
    }

    /// Edit an owned, non-terminal material. NGOs with active requests on
    /// it are told.
    pub fn update(
        &self,
        principal: &Principal,
        id: MaterialId,
        update: UpdateMaterial,
    ) -> AppResult<Material> {
        update.validate()?;
        if let Some(title) = &update.title {
            require_text("Title", title)?;
        }
        if let Some(unit) = &update.unit {
            require_text("Unit", unit)?;
        }
        if let Some(location) = &update.pickup_location {
            validate_location(location)?;
        }
        if let Some(schedule) = &update.pickup_schedule {
            validate_schedule(schedule)?;
        }

        let (material, interested_ngos) = self.store.transaction(|store| {
            let mut material: Material = store.get(id)?;
            self.check_owner(principal, &material)?;
            if material.status.is_terminal() {
                return Err(AppError::invalid_transition(format!(
                    "Material '{id}' is {} and can no longer be edited",
                    material.status
                )));
            }
            material.apply(update);
            store.put(material.clone());

            let mut ngos: Vec<UserId> = Vec::new();
            for request in active_requests(store, id) {
                if !ngos.contains(&request.ngo_id) {
                    ngos.push(request.ngo_id);
                }
            }
            Ok((material, ngos))
        })?;

        info!(material_id = %id, notified = interested_ngos.len(), "Material updated");
        self.notifications.dispatch(&DomainEvent::material(
            principal.user_id,
            MaterialEvent::Updated {
                material_id: id,
                company_id: material.company_id,
                title: material.title.clone(),
                interested_ngos,
            },
        ));
        Ok(material)
    }

    /// Move an owned material along its lifecycle.
    ///
    /// Reserving applies the sibling policy to pending requests: they are
    /// rejected, or kept and told the material is reserved. Delivery by hand
    /// is refused while any request is active, since completing a request
    /// delivers its material. Cancelling applies the removal policy.
    pub fn set_status(
        &self,
        principal: &Principal,
        id: MaterialId,
        status: MaterialStatus,
    ) -> AppResult<Material> {
        let actor = principal.user_id;
        let (material, events) = self.store.transaction(|store| {
            let mut material: Material = store.get(id)?;
            self.check_owner(principal, &material)?;
            if !material.status.can_transition_to(status) {
                warn!(material_id = %id, from = %material.status, to = %status, "Illegal material transition");
                return Err(AppError::invalid_transition(format!(
                    "Material '{id}' cannot move from {} to {status}",
                    material.status
                )));
            }

            let mut events = Vec::new();
            match status {
                MaterialStatus::Reserved => {
                    let pending_ngos = match self.policies.sibling_policy {
                        SiblingPolicy::AutoReject => {
                            events.extend(reject_pending_claims(store, &material, None, actor)?);
                            Vec::new()
                        }
                        SiblingPolicy::KeepPending => store
                            .list(|r: &Request| {
                                r.material_id == id && r.status == RequestStatus::Pending
                            })
                            .into_iter()
                            .map(|r| r.ngo_id)
                            .collect(),
                    };
                    events.push(DomainEvent::material(
                        actor,
                        MaterialEvent::Reserved {
                            material_id: id,
                            company_id: material.company_id,
                            title: material.title.clone(),
                            pending_ngos,
                        },
                    ));
                }
                MaterialStatus::Cancelled => {
                    events.extend(self.withdraw_requests(store, &material, actor)?);
                    events.push(DomainEvent::material(
                        actor,
                        MaterialEvent::Cancelled {
                            material_id: id,
                            company_id: material.company_id,
                        },
                    ));
                }
                MaterialStatus::Delivered => {
                    let active = active_requests(store, id);
                    if !active.is_empty() {
                        return Err(AppError::conflict(format!(
                            "Material '{id}' has {} active request(s); it is delivered by completing its request",
                            active.len()
                        )));
                    }
                    events.push(DomainEvent::material(
                        actor,
                        MaterialEvent::Delivered {
                            material_id: id,
                            company_id: material.company_id,
                        },
                    ));
                }
                MaterialStatus::Available => {}
            }

            material.transition(status)?;
            store.put(material.clone());
            Ok((material, events))
        })?;

        info!(material_id = %id, status = %material.status, "Material status changed");
        self.notifications.dispatch_all(&events);
        Ok(material)
    }

    /// Cancel an owned material.
    pub fn cancel(&self, principal: &Principal, id: MaterialId) -> AppResult<Material> {
        self.set_status(principal, id, MaterialStatus::Cancelled)
    }

    /// Remove an owned material, applying the removal policy to its
    /// active requests. Terminal requests keep the dangling id.
    pub fn delete(&self, principal: &Principal, id: MaterialId) -> AppResult<Material> {
        let actor = principal.user_id;
        let (removed, events) = self.store.transaction(|store| {
            let material: Material = store.get(id)?;
            self.check_owner(principal, &material)?;
            let mut events = self.withdraw_requests(store, &material, actor)?;
            let removed = store.remove::<Material>(id)?;
            events.push(DomainEvent::material(
                actor,
                MaterialEvent::Deleted {
                    material_id: id,
                    company_id: removed.company_id,
                },
            ));
            Ok((removed, events))
        })?;

        info!(material_id = %id, "Material deleted");
        self.notifications.dispatch_all(&events);
        Ok(removed)
    }

    fn check_owner(&self, principal: &Principal, material: &Material) -> AppResult<()> {
        self.rbac.require(principal, Permission::ManageOwnMaterial)?;
        ensure_material_owner(principal, material).inspect_err(|_| {
            warn!(material_id = %material.id, user_id = %principal.user_id, "Non-owner tried to manage material");
        })
    }

    /// Apply the removal policy to the material's active requests.
    fn withdraw_requests(
        &self,
        store: &EntityStore,
        material: &Material,
        actor: UserId,
    ) -> AppResult<Vec<DomainEvent>> {
        let active = active_requests(store, material.id);
        if active.is_empty() {
            return Ok(Vec::new());
        }

        match self.policies.removal_policy {
            RemovalPolicy::Forbid => Err(AppError::conflict(format!(
                "Material '{}' has {} active request(s)",
                material.id,
                active.len()
            ))),
            RemovalPolicy::CascadeReject => {
                if active.iter().any(|r| r.status.is_in_progress()) {
                    return Err(AppError::conflict(format!(
                        "Material '{}' has a request in progress",
                        material.id
                    )));
                }
                let mut events = Vec::with_capacity(active.len());
                for mut request in active {
                    request.transition(RequestStatus::Rejected)?;
                    store.put(request.clone());
                    debug!(request_id = %request.id, "Rejected request of withdrawn material");
                    events.push(DomainEvent::request(
                        actor,
                        RequestEvent::Rejected {
                            parties: parties(&request, material),
                            reason: RejectionReason::MaterialWithdrawn,
                        },
                    ));
                }
                Ok(events)
            }
        }
    }
}

fn active_requests(store: &EntityStore, material_id: MaterialId) -> Vec<Request> {
    store.list(|r: &Request| r.material_id == material_id && r.status.is_active())
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} cannot be blank")));
    }
    Ok(())
}

fn validate_location(location: &Location) -> AppResult<()> {
    require_text("Address", &location.address)?;
    require_text("City", &location.city)
}

fn parse_time(field: &str, value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        AppError::validation(format!("{field} '{value}' is not a valid HH:MM time"))
    })
}

/// Times must be `HH:MM`, and the window must not be empty.
fn validate_schedule(schedule: &PickupSchedule) -> AppResult<()> {
    let start = schedule
        .start_time
        .as_deref()
        .map(|t| parse_time("Start time", t))
        .transpose()?;
    let end = schedule
        .end_time
        .as_deref()
        .map(|t| parse_time("End time", t))
        .transpose()?;
    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(AppError::validation(
                "Pickup start time must be before end time",
            ));
        }
    }
    Ok(())
}
