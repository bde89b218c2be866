//! Integration tests for the notification dispatcher.

use donahub_core::ErrorKind;
use donahub_core::config::AppConfig;
use donahub_entity::notification::NotificationKind;

use crate::helpers::TestApp;

#[test]
fn test_mark_all_read_isolated_per_user() {
    let app = TestApp::new();
    let notifications = &app.services.notifications;
    for title in ["uno", "dos"] {
        notifications
            .notify(app.ngo.user_id, NotificationKind::SystemMessage, title, "m", None)
            .unwrap();
    }
    notifications
        .notify(app.other_ngo.user_id, NotificationKind::SystemMessage, "tres", "m", None)
        .unwrap();

    assert_eq!(notifications.mark_all_read(&app.ngo).unwrap(), 2);
    assert_eq!(notifications.unread_count(app.ngo.user_id), 0);
    assert_eq!(notifications.unread_count(app.other_ngo.user_id), 1);
}

#[test]
fn test_delete_preserves_order() {
    let app = TestApp::new();
    let notifications = &app.services.notifications;
    let ids: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|t| {
            notifications
                .notify(app.ngo.user_id, NotificationKind::SystemMessage, t, "m", None)
                .unwrap()
                .id
        })
        .collect();

    notifications.delete(&app.ngo, ids[2]).unwrap();
    let titles: Vec<String> = notifications
        .list(&app.ngo)
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["d", "b", "a"]);

    let err = notifications.delete(&app.ngo, ids[2]).unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[test]
fn test_workflow_notifications_can_be_read() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);
    app.services.workflow.approve(&app.company, request.id).unwrap();

    let notifications = &app.services.notifications;
    assert_eq!(notifications.unread_count(app.ngo.user_id), 1);
    let approved = &notifications.list(&app.ngo).unwrap()[0];
    assert_eq!(approved.payload.as_ref().unwrap()["request_id"], request.id.to_string());

    let err = notifications.mark_read(&app.company, approved.id).unwrap_err();
    assert!(err.is(ErrorKind::Authorization));
    notifications.mark_read(&app.ngo, approved.id).unwrap();
    assert_eq!(notifications.unread_count(app.ngo.user_id), 0);
}

#[test]
fn test_retention_cap_applies_to_workflow() {
    let mut config = AppConfig::default();
    config.notifications.max_stored_per_user = 2;
    let app = TestApp::with_config(config);

    for title in ["Ladrillos", "Vigas", "Tubos"] {
        let material = app.publish(title, "Madrid");
        app.submit(&app.ngo, material.id);
    }
    let inbox = app.notifications_of(app.company.user_id);
    assert_eq!(inbox.len(), 2);
    assert!(inbox.iter().all(|n| n.kind == NotificationKind::NewRequest));
    assert!(inbox[0].message.contains("Tubos"));
    assert!(inbox[1].message.contains("Vigas"));
}

#[tokio::test]
async fn test_subscriber_sees_dispatched_notifications() {
    let app = TestApp::new();
    let mut rx = app.services.notifications.subscribe();
    let material = app.publish("Ladrillos", "Madrid");
    let request = app.submit(&app.ngo, material.id);

    let received = rx.recv().await.unwrap();
    assert_eq!(received.user_id, app.company.user_id);
    assert_eq!(received.kind, NotificationKind::NewRequest);
    assert_eq!(
        received.payload.as_ref().unwrap()["request_id"],
        request.id.to_string()
    );
}
