//! Integration tests for the material catalog.

use donahub_core::ErrorKind;
use donahub_core::config::{RemovalPolicy, SiblingPolicy};
use donahub_core::types::PageRequest;
use donahub_entity::material::{Material, MaterialCategory, MaterialStatus, UpdateMaterial};
use donahub_entity::notification::NotificationKind;
use donahub_entity::request::{Request, RequestStatus};
use donahub_service::MaterialFilter;

use crate::helpers::{TestApp, material_data};

#[test]
fn test_publish_requires_company() {
    let app = TestApp::new();
    let err = app
        .services
        .catalog
        .publish(&app.ngo, material_data("Ladrillos", "Madrid"))
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));
}

#[test]
fn test_publish_validation() {
    let app = TestApp::new();
    let catalog = &app.services.catalog;

    let mut zero = material_data("Ladrillos", "Madrid");
    zero.quantity = 0;
    assert!(catalog.publish(&app.company, zero).unwrap_err().is(ErrorKind::Validation));

    let mut blank_title = material_data("   ", "Madrid");
    blank_title.unit = "kg".into();
    assert!(
        catalog
            .publish(&app.company, blank_title)
            .unwrap_err()
            .is(ErrorKind::Validation)
    );

    let no_city = material_data("Ladrillos", "");
    assert!(catalog.publish(&app.company, no_city).unwrap_err().is(ErrorKind::Validation));

    let mut inverted = material_data("Ladrillos", "Madrid");
    inverted.pickup_schedule.start_time = Some("18:00".into());
    assert!(catalog.publish(&app.company, inverted).unwrap_err().is(ErrorKind::Validation));

    assert!(app.store().all::<Material>().is_empty());
}

#[test]
fn test_list_available_filters_and_pages() {
    let app = TestApp::new();
    let catalog = &app.services.catalog;
    let madrid = app.publish("Ladrillos macizos", "Madrid");
    let mut wood = material_data("Vigas de roble", "Barcelona");
    wood.category = MaterialCategory::Wood;
    let barcelona = catalog.publish(&app.company, wood).unwrap();
    let reserved = app.publish("Ladrillos huecos", "Madrid");
    catalog
        .set_status(&app.company, reserved.id, MaterialStatus::Reserved)
        .unwrap();

    let all = catalog.list_available(&MaterialFilter::default(), &PageRequest::default());
    assert_eq!(all.total_items, 2);
    assert_eq!(all.items[0].id, barcelona.id);

    let in_madrid = MaterialFilter {
        city: Some("madrid".into()),
        ..MaterialFilter::default()
    };
    let page = catalog.list_available(&in_madrid, &PageRequest::default());
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, madrid.id);

    let wood_only = MaterialFilter {
        category: Some(MaterialCategory::Wood),
        ..MaterialFilter::default()
    };
    assert_eq!(
        catalog
            .list_available(&wood_only, &PageRequest::default())
            .total_items,
        1
    );

    let search = MaterialFilter {
        query: Some("LADRILLOS".into()),
        ..MaterialFilter::default()
    };
    assert_eq!(
        catalog.list_available(&search, &PageRequest::default()).total_items,
        1
    );

    let first_page = catalog.list_available(&MaterialFilter::default(), &PageRequest::new(1, 1));
    assert_eq!(first_page.items.len(), 1);
    assert!(first_page.has_next);
    assert_eq!(first_page.total_pages, 2);
}

#[test]
fn test_volunteer_zone_listing() {
    let app = TestApp::new();
    app.publish("Ladrillos", "Madrid");
    app.publish("Vigas", "Barcelona");

    let zone = app
        .services
        .catalog
        .list_for_volunteer(&app.volunteer)
        .unwrap();
    assert_eq!(zone.len(), 1);
    assert_eq!(zone[0].pickup_location.city, "Madrid");

    for outsider in [&app.ngo, &app.company] {
        let err = app
            .services
            .catalog
            .list_for_volunteer(outsider)
            .unwrap_err();
        assert!(err.is(ErrorKind::Authorization));
        assert!(err.message.contains("TransportDelivery"));
    }
}

#[test]
fn test_update_notifies_active_requesters() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    app.submit(&app.ngo, material.id);

    let update = UpdateMaterial {
        quantity: Some(300),
        ..UpdateMaterial::default()
    };
    let updated = app
        .services
        .catalog
        .update(&app.company, material.id, update)
        .unwrap();
    assert_eq!(updated.quantity, 300);
    assert_eq!(updated.title, "Ladrillos");
    assert_eq!(
        app.notifications_of_kind(app.ngo.user_id, NotificationKind::MaterialUpdated)
            .len(),
        1
    );
    assert!(
        app.notifications_of_kind(app.other_ngo.user_id, NotificationKind::MaterialUpdated)
            .is_empty()
    );

    let err = app
        .services
        .catalog
        .update(&app.other_company, material.id, UpdateMaterial::default())
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));
}

#[test]
fn test_material_status_edges() {
    let app = TestApp::new();
    let catalog = &app.services.catalog;
    let material = app.publish("Ladrillos", "Madrid");

    let err = catalog
        .set_status(&app.company, material.id, MaterialStatus::Delivered)
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidTransition));

    catalog
        .set_status(&app.company, material.id, MaterialStatus::Reserved)
        .unwrap();
    catalog
        .set_status(&app.company, material.id, MaterialStatus::Delivered)
        .unwrap();

    for next in [
        MaterialStatus::Available,
        MaterialStatus::Reserved,
        MaterialStatus::Cancelled,
    ] {
        let err = catalog.set_status(&app.company, material.id, next).unwrap_err();
        assert!(err.is(ErrorKind::InvalidTransition));
    }

    let err = catalog
        .update(&app.company, material.id, UpdateMaterial::default())
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidTransition));
}

#[test]
fn test_manual_reserve_rejects_pending_requests() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let first = app.submit(&app.ngo, material.id);
    let second = app.submit(&app.other_ngo, material.id);

    app.services
        .catalog
        .set_status(&app.company, material.id, MaterialStatus::Reserved)
        .unwrap();
    for (id, ngo) in [(first.id, &app.ngo), (second.id, &app.other_ngo)] {
        let request: Request = app.store().get(id).unwrap();
        assert_eq!(request.status, RequestStatus::Rejected);
        let rejected = app.notifications_of_kind(ngo.user_id, NotificationKind::RequestRejected);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].payload.as_ref().unwrap()["reason"], "material_claimed");
        assert!(
            app.notifications_of_kind(ngo.user_id, NotificationKind::MaterialReserved)
                .is_empty()
        );
    }

    // Nothing is left active, so the owner may hand it over directly.
    let delivered = app
        .services
        .catalog
        .set_status(&app.company, material.id, MaterialStatus::Delivered)
        .unwrap();
    assert_eq!(delivered.status, MaterialStatus::Delivered);
}

#[test]
fn test_manual_reserve_keeps_pending_when_configured() {
    let app = TestApp::with_policies(SiblingPolicy::KeepPending, RemovalPolicy::Forbid);
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.submit(&app.other_ngo, material.id);

    app.services
        .catalog
        .set_status(&app.company, material.id, MaterialStatus::Reserved)
        .unwrap();
    for ngo in [&app.ngo, &app.other_ngo] {
        assert_eq!(
            app.notifications_of_kind(ngo.user_id, NotificationKind::MaterialReserved)
                .len(),
            1
        );
    }
    let kept: Request = app.store().get(request.id).unwrap();
    assert_eq!(kept.status, RequestStatus::Pending);

    let err = app
        .services
        .catalog
        .set_status(&app.company, material.id, MaterialStatus::Delivered)
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    let stored: Material = app.store().get(material.id).unwrap();
    assert_eq!(stored.status, MaterialStatus::Reserved);
}

#[test]
fn test_manual_delivery_refused_while_request_in_progress() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    let workflow = &app.services.workflow;
    workflow.approve(&app.company, request.id).unwrap();
    workflow
        .assign_volunteer(&app.company, request.id, app.volunteer.user_id)
        .unwrap();

    let err = app
        .services
        .catalog
        .set_status(&app.company, material.id, MaterialStatus::Delivered)
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    let stored: Material = app.store().get(material.id).unwrap();
    assert_eq!(stored.status, MaterialStatus::Reserved);
    let stored: Request = app.store().get(request.id).unwrap();
    assert_eq!(stored.status, RequestStatus::AssignedToVolunteer);

    workflow
        .advance(&app.volunteer, request.id, RequestStatus::InTransit)
        .unwrap();
    workflow
        .advance(&app.volunteer, request.id, RequestStatus::Completed)
        .unwrap();
    let stored: Material = app.store().get(material.id).unwrap();
    assert_eq!(stored.status, MaterialStatus::Delivered);
}

#[test]
fn test_forbid_policy_blocks_removal() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);

    let err = app.services.catalog.delete(&app.company, material.id).unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    let err = app.services.catalog.cancel(&app.company, material.id).unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    let stored: Material = app.store().get(material.id).unwrap();
    assert_eq!(stored.status, MaterialStatus::Available);

    // Once the request is terminal the material can go.
    app.services.workflow.reject(&app.company, request.id).unwrap();
    app.services.catalog.delete(&app.company, material.id).unwrap();
    assert!(app.store().find::<Material>(material.id).is_none());
    let orphan: Request = app.store().get(request.id).unwrap();
    assert_eq!(orphan.material_id, material.id);
}

#[test]
fn test_cascade_policy_rejects_pending() {
    let app = TestApp::with_policies(SiblingPolicy::AutoReject, RemovalPolicy::CascadeReject);
    let material = app.publish("Ladrillos", "Madrid");
    let first = app.submit(&app.ngo, material.id);
    let second = app.submit(&app.other_ngo, material.id);

    let cancelled = app.services.catalog.cancel(&app.company, material.id).unwrap();
    assert_eq!(cancelled.status, MaterialStatus::Cancelled);

    for (id, ngo) in [(first.id, &app.ngo), (second.id, &app.other_ngo)] {
        let request: Request = app.store().get(id).unwrap();
        assert_eq!(request.status, RequestStatus::Rejected);
        let rejected = app.notifications_of_kind(ngo.user_id, NotificationKind::RequestRejected);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].payload.as_ref().unwrap()["reason"], "material_withdrawn");
    }
}

#[test]
fn test_cascade_policy_still_protects_approved() {
    let app = TestApp::with_policies(SiblingPolicy::KeepPending, RemovalPolicy::CascadeReject);
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.services.workflow.approve(&app.company, request.id).unwrap();

    let err = app.services.catalog.delete(&app.company, material.id).unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    assert!(app.store().contains::<Material>(material.id));
}

#[test]
fn test_owner_listing_includes_every_status() {
    let app = TestApp::new();
    let catalog = &app.services.catalog;
    let kept = app.publish("Ladrillos", "Madrid");
    let gone = app.publish("Vigas", "Madrid");
    catalog.cancel(&app.company, gone.id).unwrap();

    let owned = catalog.list_owned(&app.company).unwrap();
    assert_eq!(owned.len(), 2);
    assert_eq!(owned[0].id, gone.id);
    assert_eq!(owned[1].id, kept.id);
    assert!(catalog.list_owned(&app.other_company).unwrap().is_empty());
    assert!(catalog.list_owned(&app.ngo).is_err());
}
