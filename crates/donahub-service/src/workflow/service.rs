//! Request workflow service.
//!
//! ```text
//! pending ──► approved ──► assigned_to_volunteer ──► in_transit ──► completed
//!    │            └──────────────────────────────────────────────────►┘
//!    └──► rejected
//! ```
//!
//! Every step runs inside a store transaction and produces domain events,
//! which are dispatched as notifications once the step has committed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use donahub_auth::{Permission, Principal, RbacEnforcer};
use donahub_core::AppResult;
use donahub_core::config::{SiblingPolicy, WorkflowConfig};
use donahub_core::error::AppError;
use donahub_core::events::{DomainEvent, RejectionReason, RequestEvent};
use donahub_core::types::{MaterialId, RequestId, UserId};
use donahub_entity::material::{Material, MaterialStatus};
use donahub_entity::request::{Request, RequestStatus};
use donahub_entity::user::User;
use donahub_store::EntityStore;

use super::decision::Decision;
use crate::notification::NotificationService;
use crate::support::{ensure_material_owner, newest_first, parties, reject_pending_claims};

/// Drives requests through their lifecycle.
#[derive(Debug, Clone)]
pub struct WorkflowService {
    store: Arc<EntityStore>,
    notifications: Arc<NotificationService>,
    rbac: RbacEnforcer,
    config: WorkflowConfig,
}

impl WorkflowService {
    /// Creates a new workflow service.
    pub fn new(
        store: Arc<EntityStore>,
        notifications: Arc<NotificationService>,
        rbac: RbacEnforcer,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            store,
            notifications,
            rbac,
            config,
        }
    }

    /// An NGO asks for an available material.
    pub fn submit(
        &self,
        principal: &Principal,
        material_id: MaterialId,
        message: &str,
    ) -> AppResult<Request> {
        self.rbac.require(principal, Permission::SubmitRequest)?;
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::validation("Request message cannot be empty"));
        }

        let (request, event) = self.store.transaction(|store| {
            let material = store
                .find::<Material>(material_id)
                .filter(Material::is_available)
                .ok_or_else(|| {
                    AppError::validation(format!(
                        "Material '{material_id}' is not available for requests"
                    ))
                })?;

            let ngo = principal.user_id;
            let duplicate = store.count(|r: &Request| {
                r.material_id == material_id && r.ngo_id == ngo && r.status.is_active()
            });
            if duplicate > 0 {
                return Err(AppError::conflict(format!(
                    "An active request on material '{material_id}' already exists"
                )));
            }

            let request = Request::new(material_id, ngo, message);
            store.put(request.clone());
            let event = DomainEvent::request(
                ngo,
                RequestEvent::Submitted(parties(&request, &material)),
            );
            Ok((request, event))
        })?;

        info!(
            request_id = %request.id,
            %material_id,
            ngo_id = %request.ngo_id,
            "Request submitted"
        );
        self.notifications.dispatch(&event);
        Ok(request)
    }

    /// The owning company approves or rejects a pending request.
    ///
    /// Approval reserves the material; other pending requests on it are
    /// handled by the sibling policy.
    pub fn decide(
        &self,
        principal: &Principal,
        request_id: RequestId,
        decision: Decision,
    ) -> AppResult<Request> {
        let actor = principal.user_id;
        let (request, events) = self.store.transaction(|store| {
            let mut request: Request = store.get(request_id)?;
            let mut material: Material = store.get(request.material_id)?;
            self.rbac.require(principal, Permission::DecideRequest)?;
            ensure_material_owner(principal, &material).inspect_err(|_| {
                warn!(%request_id, user_id = %actor, "Non-owner tried to decide request");
            })?;
            if request.status != RequestStatus::Pending {
                return Err(AppError::invalid_transition(format!(
                    "Request '{request_id}' is {} and can no longer be decided",
                    request.status
                )));
            }

            let mut events = Vec::new();
            match decision {
                Decision::Approve => {
                    if !material.is_available() {
                        return Err(AppError::conflict(format!(
                            "Material '{}' is {} and cannot be approved for another request",
                            material.id, material.status
                        )));
                    }
                    request.transition(RequestStatus::Approved)?;
                    material.transition(MaterialStatus::Reserved)?;
                    store.put(request.clone());
                    store.put(material.clone());
                    events.push(DomainEvent::request(
                        actor,
                        RequestEvent::Approved(parties(&request, &material)),
                    ));

                    if self.config.sibling_policy == SiblingPolicy::AutoReject {
                        events.extend(reject_pending_claims(
                            store,
                            &material,
                            Some(request_id),
                            actor,
                        )?);
                    }
                }
                Decision::Reject => {
                    request.transition(RequestStatus::Rejected)?;
                    store.put(request.clone());
                    events.push(DomainEvent::request(
                        actor,
                        RequestEvent::Rejected {
                            parties: parties(&request, &material),
                            reason: RejectionReason::Declined,
                        },
                    ));
                }
            }
            Ok((request, events))
        })?;

        info!(%request_id, %decision, status = %request.status, "Request decided");
        self.notifications.dispatch_all(&events);
        Ok(request)
    }

    /// Shorthand for [`decide`](Self::decide) with [`Decision::Approve`].
    pub fn approve(&self, principal: &Principal, request_id: RequestId) -> AppResult<Request> {
        self.decide(principal, request_id, Decision::Approve)
    }

    /// Shorthand for [`decide`](Self::decide) with [`Decision::Reject`].
    pub fn reject(&self, principal: &Principal, request_id: RequestId) -> AppResult<Request> {
        self.decide(principal, request_id, Decision::Reject)
    }

    /// Put a volunteer in charge of transporting an approved request.
    ///
    /// The owning company may assign any volunteer; a volunteer may only
    /// assign themself.
    pub fn assign_volunteer(
        &self,
        principal: &Principal,
        request_id: RequestId,
        volunteer_id: UserId,
    ) -> AppResult<Request> {
        let actor = principal.user_id;
        let (request, event) = self.store.transaction(|store| {
            let mut request: Request = store.get(request_id)?;
            if !request
                .status
                .can_transition_to(RequestStatus::AssignedToVolunteer)
            {
                return Err(AppError::invalid_transition(format!(
                    "Request '{request_id}' is {}; only approved requests take a volunteer",
                    request.status
                )));
            }
            let material: Material = store.get(request.material_id)?;
            self.rbac.require(principal, Permission::AssignVolunteer)?;
            let allowed = material.is_owned_by(actor)
                || (principal.is_volunteer() && actor == volunteer_id);
            if !allowed {
                warn!(%request_id, user_id = %actor, "Unauthorized volunteer assignment");
                return Err(AppError::authorization(
                    "Only the owning company or the volunteer themself can assign",
                ));
            }

            let volunteer: User = store.get(volunteer_id)?;
            if !volunteer.is_volunteer() {
                return Err(AppError::validation(format!(
                    "User '{volunteer_id}' is not a volunteer"
                )));
            }

            request.transition(RequestStatus::AssignedToVolunteer)?;
            request.volunteer_id = Some(volunteer_id);
            store.put(request.clone());
            let event = DomainEvent::request(
                actor,
                RequestEvent::VolunteerAssigned(parties(&request, &material)),
            );
            Ok((request, event))
        })?;

        info!(%request_id, %volunteer_id, "Volunteer assigned");
        self.notifications.dispatch(&event);
        Ok(request)
    }

    /// Move a request into transport or to completion.
    ///
    /// Completion marks the material delivered.
    pub fn advance(
        &self,
        principal: &Principal,
        request_id: RequestId,
        to: RequestStatus,
    ) -> AppResult<Request> {
        let actor = principal.user_id;
        let (request, events) = self.store.transaction(|store| {
            let mut request: Request = store.get(request_id)?;
            let from = request.status;
            let advancing = matches!(to, RequestStatus::InTransit | RequestStatus::Completed);
            if !advancing || !from.can_transition_to(to) {
                warn!(%request_id, %from, %to, "Illegal request transition");
                return Err(AppError::invalid_transition(format!(
                    "Request '{request_id}' cannot advance from {from} to {to}"
                )));
            }

            let mut material: Material = store.get(request.material_id)?;
            let is_volunteer = request.is_assigned_to(actor);
            let is_ngo = request.ngo_id == actor;
            let is_owner = material.is_owned_by(actor);
            let allowed = match (from, to) {
                (_, RequestStatus::InTransit) => is_volunteer,
                (RequestStatus::InTransit, RequestStatus::Completed) => is_volunteer || is_ngo,
                (RequestStatus::Approved, RequestStatus::Completed) => is_ngo || is_owner,
                _ => false,
            };
            if !allowed {
                warn!(%request_id, user_id = %actor, %to, "Unauthorized request transition");
                return Err(AppError::authorization(format!(
                    "Not allowed to move request '{request_id}' to {to}"
                )));
            }

            // Both records are checked before either is written.
            let delivers = to == RequestStatus::Completed
                && match material.status {
                    MaterialStatus::Reserved => true,
                    MaterialStatus::Delivered => false,
                    other => {
                        return Err(AppError::conflict(format!(
                            "Material '{}' is {other} and cannot be delivered",
                            material.id
                        )));
                    }
                };
            request.transition(to)?;
            if delivers {
                material.transition(MaterialStatus::Delivered)?;
            }
            store.put(request.clone());
            if delivers {
                store.put(material.clone());
            }

            let mut events = Vec::new();
            if to == RequestStatus::Completed {
                events.push(DomainEvent::request(
                    actor,
                    RequestEvent::Completed(parties(&request, &material)),
                ));
            } else {
                events.push(DomainEvent::request(
                    actor,
                    RequestEvent::InTransit(parties(&request, &material)),
                ));
            }
            Ok((request, events))
        })?;

        info!(%request_id, status = %request.status, "Request advanced");
        self.notifications.dispatch_all(&events);
        Ok(request)
    }

    /// Record the agreed pickup date and transport notes.
    pub fn schedule_pickup(
        &self,
        principal: &Principal,
        request_id: RequestId,
        pickup_date: Option<DateTime<Utc>>,
        transport_notes: Option<String>,
    ) -> AppResult<Request> {
        let actor = principal.user_id;
        let (request, event) = self.store.transaction(|store| {
            let mut request: Request = store.get(request_id)?;
            if !request.status.is_in_progress() {
                return Err(AppError::invalid_transition(format!(
                    "Request '{request_id}' is {}; pickups are scheduled after approval",
                    request.status
                )));
            }
            let material: Material = store.get(request.material_id)?;
            let allowed = request.ngo_id == actor
                || material.is_owned_by(actor)
                || request.is_assigned_to(actor);
            if !allowed {
                return Err(AppError::authorization(
                    "Only the parties of a request can schedule its pickup",
                ));
            }

            if pickup_date.is_some() {
                request.pickup_date = pickup_date;
            }
            if let Some(notes) = &transport_notes {
                let notes = notes.trim();
                request.transport_notes = (!notes.is_empty()).then(|| notes.to_string());
            }
            request.updated_at = Utc::now();
            store.put(request.clone());
            let event = DomainEvent::request(
                actor,
                RequestEvent::PickupScheduled {
                    parties: parties(&request, &material),
                    pickup_date: request.pickup_date,
                },
            );
            Ok((request, event))
        })?;

        info!(%request_id, pickup_date = ?request.pickup_date, "Pickup scheduled");
        self.notifications.dispatch(&event);
        Ok(request)
    }

    /// The owning company reminds the NGO to collect an approved request.
    pub fn send_pickup_reminder(
        &self,
        principal: &Principal,
        request_id: RequestId,
    ) -> AppResult<Request> {
        let request: Request = self.store.get(request_id)?;
        let material: Material = self.store.get(request.material_id)?;
        ensure_material_owner(principal, &material)?;
        if !matches!(
            request.status,
            RequestStatus::Approved | RequestStatus::AssignedToVolunteer
        ) {
            return Err(AppError::invalid_transition(format!(
                "Request '{request_id}' is {}; reminders apply to approved requests",
                request.status
            )));
        }

        info!(%request_id, ngo_id = %request.ngo_id, "Pickup reminder sent");
        self.notifications.dispatch(&DomainEvent::request(
            principal.user_id,
            RequestEvent::PickupReminder(parties(&request, &material)),
        ));
        Ok(request)
    }

    /// One request by id.
    pub fn get(&self, request_id: RequestId) -> AppResult<Request> {
        self.store.get(request_id)
    }

    /// The NGO's own requests, newest first.
    pub fn list_for_ngo(&self, principal: &Principal) -> AppResult<Vec<Request>> {
        self.rbac.require(principal, Permission::SubmitRequest)?;
        let ngo = principal.user_id;
        Ok(self.newest(|r| r.ngo_id == ngo))
    }

    /// Requests against the company's materials, newest first.
    pub fn list_for_company(&self, principal: &Principal) -> AppResult<Vec<Request>> {
        self.rbac.require(principal, Permission::DecideRequest)?;
        let company = principal.user_id;
        let owned: Vec<MaterialId> = self
            .store
            .list(|m: &Material| m.company_id == company)
            .into_iter()
            .map(|m| m.id)
            .collect();
        Ok(self.newest(|r| owned.contains(&r.material_id)))
    }

    /// Requests assigned to the volunteer, newest first.
    pub fn list_for_volunteer(&self, principal: &Principal) -> AppResult<Vec<Request>> {
        self.rbac.require(principal, Permission::TransportDelivery)?;
        let volunteer = principal.user_id;
        Ok(self.newest(|r| r.is_assigned_to(volunteer)))
    }

    /// Approved requests still waiting for a volunteer, whose material lies
    /// in the volunteer's coverage zones.
    pub fn list_assignable(&self, principal: &Principal) -> AppResult<Vec<Request>> {
        self.rbac.require(principal, Permission::TransportDelivery)?;
        let volunteer: User = self.store.get(principal.user_id)?;
        Ok(self.newest(|r| {
            r.status == RequestStatus::Approved
                && self
                    .store
                    .find::<Material>(r.material_id)
                    .is_some_and(|m| volunteer.covers_city(&m.pickup_location.city))
        }))
    }

    /// Requests on one owned material, newest first.
    pub fn list_for_material(
        &self,
        principal: &Principal,
        material_id: MaterialId,
    ) -> AppResult<Vec<Request>> {
        let material: Material = self.store.get(material_id)?;
        ensure_material_owner(principal, &material)?;
        Ok(self.newest(|r| r.material_id == material_id))
    }

    fn newest<F>(&self, predicate: F) -> Vec<Request>
    where
        F: Fn(&Request) -> bool,
    {
        newest_first(self.store.list(predicate), |r| r.created_at)
    }
}
