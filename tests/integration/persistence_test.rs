//! Integration tests for snapshots, demo data and the activity feed.

use std::sync::Arc;

use donahub_auth::MemorySessionStore;
use donahub_core::config::AppConfig;
use donahub_entity::material::{Material, MaterialStatus};
use donahub_entity::notification::Notification;
use donahub_entity::request::{Request, RequestStatus};
use donahub_service::{ActivityKind, Services};
use donahub_store::{EntityStore, seed_demo};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_workflow_state_survives_snapshot() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.services.workflow.approve(&app.company, request.id).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("store.json");
    app.store().save(&path).await.unwrap();

    let reloaded = EntityStore::load(&path).await.unwrap();
    let stored: Request = reloaded.get(request.id).unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
    let stored: Material = reloaded.get(material.id).unwrap();
    assert_eq!(stored.status, MaterialStatus::Reserved);

    let before: Vec<_> = app
        .notifications_of(app.ngo.user_id)
        .into_iter()
        .map(|n| n.id)
        .collect();
    let after: Vec<_> = reloaded
        .list(|n: &Notification| n.user_id == app.ngo.user_id)
        .into_iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_demo_data_drives_the_workflow() {
    let store = Arc::new(EntityStore::new());
    let demo = seed_demo(&store).unwrap();
    let services = Services::new(
        &AppConfig::default(),
        Arc::clone(&store),
        Arc::new(MemorySessionStore::new()),
    );

    let company = services
        .auth
        .find_by_email("constructora@ejemplo.com")
        .unwrap();
    let company = donahub_auth::Principal::from_user(&company);
    assert_eq!(company.user_id, demo.company);

    let unread_before = services.notifications.unread_count(demo.ngo);
    services
        .workflow
        .approve(&company, demo.pending_request)
        .unwrap();
    assert_eq!(services.notifications.unread_count(demo.ngo), unread_before + 1);

    let bricks: Material = store.get(demo.bricks).unwrap();
    assert_eq!(bricks.status, MaterialStatus::Reserved);

    let feed = services.activity.recent(10);
    assert_eq!(feed[0].kind, ActivityKind::RequestApproved);
    assert_eq!(feed[0].city, "Madrid");
    assert!(feed.iter().any(|item| item.kind == ActivityKind::RequestSent));
    assert_eq!(services.activity.recent(2).len(), 2);
}
