//! Integration tests for the request workflow.

use donahub_core::ErrorKind;
use donahub_core::config::{RemovalPolicy, SiblingPolicy};
use donahub_entity::material::{Material, MaterialStatus};
use donahub_entity::notification::NotificationKind;
use donahub_entity::request::{Request, RequestStatus};
use donahub_service::Decision;

use crate::helpers::TestApp;

#[test]
fn test_submit_then_owner_approves() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");

    let request = app.submit(&app.ngo, material.id);
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.material_id, material.id);
    assert_eq!(request.ngo_id, app.ngo.user_id);
    assert_eq!(request.message, "Necesitamos ladrillos");

    let before = app.notifications_of(app.ngo.user_id).len();
    let approved = app
        .services
        .workflow
        .decide(&app.company, request.id, Decision::Approve)
        .unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);

    let ngo_inbox = app.notifications_of(app.ngo.user_id);
    assert_eq!(ngo_inbox.len(), before + 1);
    assert_eq!(ngo_inbox[0].kind, NotificationKind::RequestApproved);
    assert!(!ngo_inbox[0].read);
    assert_eq!(
        app.notifications_of_kind(app.ngo.user_id, NotificationKind::RequestApproved)
            .len(),
        1
    );

    let material: Material = app.store().get(material.id).unwrap();
    assert_eq!(material.status, MaterialStatus::Reserved);
}

#[test]
fn test_submit_notifies_owner() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    app.submit(&app.ngo, material.id);

    let inbox = app.notifications_of(app.company.user_id);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::NewRequest);
    assert!(inbox[0].message.contains("Fundación X"));
    assert!(app.notifications_of(app.ngo.user_id).is_empty());
}

#[test]
fn test_non_owner_decision_changes_nothing() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    let notifications_before = app.notification_total();

    let err = app
        .services
        .workflow
        .decide(&app.other_company, request.id, Decision::Approve)
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));

    let stored: Request = app.store().get(request.id).unwrap();
    assert_eq!(stored.status, RequestStatus::Pending);
    assert_eq!(app.notification_total(), notifications_before);

    let material: Material = app.store().get(material.id).unwrap();
    assert_eq!(material.status, MaterialStatus::Available);
}

#[test]
fn test_submit_validation() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let workflow = &app.services.workflow;

    let blank = workflow.submit(&app.ngo, material.id, "   ").unwrap_err();
    assert!(blank.is(ErrorKind::Validation));

    let by_company = workflow
        .submit(&app.company, material.id, "Hola")
        .unwrap_err();
    assert!(by_company.is(ErrorKind::Authorization));

    let unknown = workflow
        .submit(&app.ngo, donahub_core::types::MaterialId::new(), "Hola")
        .unwrap_err();
    assert!(unknown.is(ErrorKind::Validation));

    app.submit(&app.ngo, material.id);
    let duplicate = workflow.submit(&app.ngo, material.id, "Otra vez").unwrap_err();
    assert!(duplicate.is(ErrorKind::Conflict));
}

#[test]
fn test_submit_on_reserved_material_fails() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.services.workflow.approve(&app.company, request.id).unwrap();

    let err = app
        .services
        .workflow
        .submit(&app.other_ngo, material.id, "Tarde")
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}

#[test]
fn test_approval_auto_rejects_siblings() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let first = app.submit(&app.ngo, material.id);
    let second = app.submit(&app.other_ngo, material.id);

    app.services.workflow.approve(&app.company, first.id).unwrap();

    let sibling: Request = app.store().get(second.id).unwrap();
    assert_eq!(sibling.status, RequestStatus::Rejected);
    let rejected =
        app.notifications_of_kind(app.other_ngo.user_id, NotificationKind::RequestRejected);
    assert_eq!(rejected.len(), 1);
    let payload = rejected[0].payload.as_ref().unwrap();
    assert_eq!(payload["reason"], "material_claimed");
}

#[test]
fn test_keep_pending_leaves_siblings() {
    let app = TestApp::with_policies(SiblingPolicy::KeepPending, RemovalPolicy::Forbid);
    let material = app.publish("Ladrillos", "Madrid");
    let first = app.submit(&app.ngo, material.id);
    let second = app.submit(&app.other_ngo, material.id);

    app.services.workflow.approve(&app.company, first.id).unwrap();
    let sibling: Request = app.store().get(second.id).unwrap();
    assert_eq!(sibling.status, RequestStatus::Pending);

    // The material is claimed, so the sibling can only be rejected.
    let err = app
        .services
        .workflow
        .approve(&app.company, second.id)
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    let rejected = app.services.workflow.reject(&app.company, second.id).unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
}

#[test]
fn test_reject_notifies_ngo_once() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);

    let rejected = app.services.workflow.reject(&app.company, request.id).unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    let inbox = app.notifications_of(app.ngo.user_id);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::RequestRejected);

    let material: Material = app.store().get(material.id).unwrap();
    assert_eq!(material.status, MaterialStatus::Available);
}

#[test]
fn test_decide_twice_is_invalid_transition() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.services.workflow.reject(&app.company, request.id).unwrap();

    let err = app
        .services
        .workflow
        .approve(&app.company, request.id)
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidTransition));
}

#[test]
fn test_decide_unknown_request() {
    let app = TestApp::new();
    let err = app
        .services
        .workflow
        .approve(&app.company, donahub_core::types::RequestId::new())
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[test]
fn test_full_delivery_lifecycle() {
    let app = TestApp::new();
    let workflow = &app.services.workflow;
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    workflow.approve(&app.company, request.id).unwrap();

    let assigned = workflow
        .assign_volunteer(&app.company, request.id, app.volunteer.user_id)
        .unwrap();
    assert_eq!(assigned.status, RequestStatus::AssignedToVolunteer);
    assert_eq!(assigned.volunteer_id, Some(app.volunteer.user_id));
    assert_eq!(
        app.notifications_of_kind(app.volunteer.user_id, NotificationKind::VolunteerAssigned)
            .len(),
        1
    );
    assert_eq!(
        app.notifications_of_kind(app.ngo.user_id, NotificationKind::VolunteerAssigned)
            .len(),
        1
    );

    // Only the assigned volunteer starts the transport.
    let err = workflow
        .advance(&app.ngo, request.id, RequestStatus::InTransit)
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));

    let moving = workflow
        .advance(&app.volunteer, request.id, RequestStatus::InTransit)
        .unwrap();
    assert_eq!(moving.status, RequestStatus::InTransit);
    assert!(
        app.notifications_of_kind(app.volunteer.user_id, NotificationKind::RequestInTransit)
            .is_empty()
    );
    assert_eq!(
        app.notifications_of_kind(app.company.user_id, NotificationKind::RequestInTransit)
            .len(),
        1
    );

    let done = workflow
        .advance(&app.ngo, request.id, RequestStatus::Completed)
        .unwrap();
    assert_eq!(done.status, RequestStatus::Completed);
    let material: Material = app.store().get(material.id).unwrap();
    assert_eq!(material.status, MaterialStatus::Delivered);
    assert_eq!(
        app.notifications_of_kind(app.volunteer.user_id, NotificationKind::RequestCompleted)
            .len(),
        1
    );
    assert!(
        app.notifications_of_kind(app.ngo.user_id, NotificationKind::RequestCompleted)
            .is_empty()
    );
}

#[test]
fn test_direct_completion_from_approved() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.services.workflow.approve(&app.company, request.id).unwrap();

    let err = app
        .services
        .workflow
        .advance(&app.volunteer, request.id, RequestStatus::Completed)
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));

    let done = app
        .services
        .workflow
        .advance(&app.company, request.id, RequestStatus::Completed)
        .unwrap();
    assert_eq!(done.status, RequestStatus::Completed);
    let material: Material = app.store().get(material.id).unwrap();
    assert_eq!(material.status, MaterialStatus::Delivered);
}

#[test]
fn test_completion_on_undeliverable_material_changes_nothing() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.services.workflow.approve(&app.company, request.id).unwrap();

    // Out-of-band edit of the stored snapshot.
    let mut withdrawn: Material = app.store().get(material.id).unwrap();
    withdrawn.status = MaterialStatus::Cancelled;
    app.store().put(withdrawn);

    let err = app
        .services
        .workflow
        .advance(&app.ngo, request.id, RequestStatus::Completed)
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    let stored: Request = app.store().get(request.id).unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
    let stored: Material = app.store().get(material.id).unwrap();
    assert_eq!(stored.status, MaterialStatus::Cancelled);
}

#[test]
fn test_terminal_requests_cannot_move() {
    let app = TestApp::new();
    let workflow = &app.services.workflow;
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    workflow.approve(&app.company, request.id).unwrap();
    workflow
        .advance(&app.ngo, request.id, RequestStatus::Completed)
        .unwrap();

    for to in [RequestStatus::InTransit, RequestStatus::Completed] {
        let err = workflow.advance(&app.ngo, request.id, to).unwrap_err();
        assert!(err.is(ErrorKind::InvalidTransition));
    }
    let err = workflow
        .assign_volunteer(&app.company, request.id, app.volunteer.user_id)
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidTransition));

    let other = app.publish("Vigas", "Madrid");
    let rejected = app.submit(&app.ngo, other.id);
    workflow.reject(&app.company, rejected.id).unwrap();
    let err = workflow
        .advance(&app.ngo, rejected.id, RequestStatus::Completed)
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidTransition));
}

#[test]
fn test_advance_rejects_backward_edges() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);

    for to in [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::InTransit,
        RequestStatus::Completed,
    ] {
        let err = app
            .services
            .workflow
            .advance(&app.ngo, request.id, to)
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidTransition), "pending -> {to}");
    }
}

#[test]
fn test_volunteer_self_assignment() {
    let app = TestApp::new();
    let workflow = &app.services.workflow;
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);

    let err = workflow
        .assign_volunteer(&app.volunteer, request.id, app.volunteer.user_id)
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidTransition));

    workflow.approve(&app.company, request.id).unwrap();
    let assignable = workflow.list_assignable(&app.volunteer).unwrap();
    assert_eq!(assignable.len(), 1);

    // A volunteer cannot assign somebody else.
    let err = workflow
        .assign_volunteer(&app.volunteer, request.id, app.ngo.user_id)
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));

    workflow
        .assign_volunteer(&app.volunteer, request.id, app.volunteer.user_id)
        .unwrap();
    assert!(workflow.list_assignable(&app.volunteer).unwrap().is_empty());
    assert_eq!(workflow.list_for_volunteer(&app.volunteer).unwrap().len(), 1);
    assert_eq!(
        app.notifications_of_kind(app.company.user_id, NotificationKind::VolunteerAssigned)
            .len(),
        1
    );
}

#[test]
fn test_assign_requires_volunteer_role() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.services.workflow.approve(&app.company, request.id).unwrap();

    let err = app
        .services
        .workflow
        .assign_volunteer(&app.company, request.id, app.other_ngo.user_id)
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}

#[test]
fn test_schedule_and_reminder() {
    let app = TestApp::new();
    let workflow = &app.services.workflow;
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);

    let err = workflow
        .schedule_pickup(&app.ngo, request.id, Some(chrono::Utc::now()), None)
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidTransition));

    workflow.approve(&app.company, request.id).unwrap();
    let date = chrono::Utc::now() + chrono::Duration::days(2);
    let scheduled = workflow
        .schedule_pickup(&app.ngo, request.id, Some(date), Some("Traer carretilla".into()))
        .unwrap();
    assert_eq!(scheduled.pickup_date, Some(date));
    assert_eq!(scheduled.transport_notes.as_deref(), Some("Traer carretilla"));

    let err = workflow
        .schedule_pickup(&app.other_ngo, request.id, None, Some("x".into()))
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));

    let reminders_before =
        app.notifications_of_kind(app.ngo.user_id, NotificationKind::PickupReminder).len();
    workflow.send_pickup_reminder(&app.company, request.id).unwrap();
    assert_eq!(
        app.notifications_of_kind(app.ngo.user_id, NotificationKind::PickupReminder)
            .len(),
        reminders_before + 1
    );
    let err = workflow
        .send_pickup_reminder(&app.other_company, request.id)
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));
}

#[test]
fn test_listings_are_scoped() {
    let app = TestApp::new();
    let workflow = &app.services.workflow;
    let bricks = app.publish("Ladrillos", "Madrid");
    let beams = app.publish("Vigas", "Madrid");
    let first = app.submit(&app.ngo, bricks.id);
    let second = app.submit(&app.ngo, beams.id);
    app.submit(&app.other_ngo, beams.id);

    let mine: Vec<_> = workflow
        .list_for_ngo(&app.ngo)
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(mine.len(), 2);
    assert!(mine.contains(&first.id) && mine.contains(&second.id));

    assert_eq!(workflow.list_for_company(&app.company).unwrap().len(), 3);
    assert!(workflow.list_for_company(&app.other_company).unwrap().is_empty());
    assert_eq!(
        workflow.list_for_material(&app.company, beams.id).unwrap().len(),
        2
    );
    let err = workflow
        .list_for_material(&app.other_company, beams.id)
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));
    assert!(workflow.list_for_ngo(&app.company).is_err());
}
