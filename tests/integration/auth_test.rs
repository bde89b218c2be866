//! Integration tests for registration, sessions, dashboards and impact.

use std::sync::Arc;

use donahub_auth::{AuthGateway, FileSessionStore, RegisterRequest};
use donahub_core::ErrorKind;
use donahub_entity::material::MaterialCategory;
use donahub_entity::request::RequestStatus;
use donahub_entity::user::UserRole;
use donahub_service::DashboardCounters;

use crate::helpers::TestApp;

fn ngo_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        name: "Lucía".to_string(),
        role: UserRole::Ngo,
        organization: Some("Hogar Común".to_string()),
        phone: None,
        vehicle_type: None,
        coverage_zones: Vec::new(),
        skills: Vec::new(),
    }
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = TestApp::new();
    let auth = &app.services.auth;

    let err = auth.require_current().await.unwrap_err();
    assert!(err.is(ErrorKind::Authentication));

    let user = auth.login("  INFO@fundacionx.org ").await.unwrap();
    assert_eq!(user.id, app.ngo.user_id);
    let principal = auth.require_current().await.unwrap();
    assert_eq!(principal, app.ngo);

    auth.logout().await.unwrap();
    assert!(auth.current().await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new();
    let err = app.services.auth.login("nadie@x.org").await.unwrap_err();
    assert!(err.is(ErrorKind::Authentication));
}

#[test]
fn test_register_rules() {
    let app = TestApp::new();
    let auth = &app.services.auth;

    let duplicate = auth.register(ngo_request("OBRA@abc.es")).unwrap_err();
    assert!(duplicate.is(ErrorKind::Conflict));

    let bad_email = auth.register(ngo_request("no-es-un-correo")).unwrap_err();
    assert!(bad_email.is(ErrorKind::Validation));

    let mut no_org = ngo_request("nueva@ong.org");
    no_org.organization = None;
    assert!(auth.register(no_org).unwrap_err().is(ErrorKind::Validation));

    let mut volunteer = ngo_request("ana@correo.es");
    volunteer.role = UserRole::Volunteer;
    volunteer.organization = None;
    assert!(
        auth.register(volunteer.clone())
            .unwrap_err()
            .is(ErrorKind::Validation)
    );
    volunteer.coverage_zones = vec!["Valencia".to_string()];
    let user = auth.register(volunteer).unwrap();
    assert!(user.covers_city("valencia"));
}

#[tokio::test]
async fn test_file_session_survives_new_gateway() {
    let app = TestApp::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = AuthGateway::new(
        Arc::clone(&app.services.store),
        Arc::new(FileSessionStore::new(&path)),
    );
    first.login("obra@abc.es").await.unwrap();

    let second = AuthGateway::new(
        Arc::clone(&app.services.store),
        Arc::new(FileSessionStore::new(&path)),
    );
    let principal = second.require_current().await.unwrap();
    assert_eq!(principal.user_id, app.company.user_id);
    assert!(principal.is_company());

    second.logout().await.unwrap();
    assert!(first.current().await.unwrap().is_none());
}

#[test]
fn test_dashboards_follow_the_workflow() {
    let app = TestApp::new();
    let material = app.publish("Ladrillos", "Madrid");
    app.publish("Vigas", "Barcelona");
    let request = app.submit(&app.ngo, material.id);

    let company = app.services.dashboard.summary(&app.company).unwrap();
    assert_eq!(company.name, "Constructora ABC");
    assert_eq!(company.unread_notifications, 1);
    assert_eq!(
        company.counters,
        DashboardCounters::Company {
            published: 2,
            available: 2,
            reserved: 0,
            delivered: 0,
            pending_requests: 1,
        }
    );

    app.services.workflow.approve(&app.company, request.id).unwrap();
    app.services
        .workflow
        .assign_volunteer(&app.company, request.id, app.volunteer.user_id)
        .unwrap();

    let ngo = app.services.dashboard.summary(&app.ngo).unwrap();
    assert_eq!(
        ngo.counters,
        DashboardCounters::Ngo {
            total_requests: 1,
            pending: 0,
            in_progress: 1,
            completed: 0,
            available_materials: 1,
        }
    );

    let volunteer = app.services.dashboard.summary(&app.volunteer).unwrap();
    assert_eq!(
        volunteer.counters,
        DashboardCounters::Volunteer {
            active_assignments: 1,
            completed_deliveries: 0,
            materials_in_zone: 0,
        }
    );
    assert_eq!(volunteer.unread_notifications, 1);
}

#[test]
fn test_impact_counts_completed_deliveries() {
    let app = TestApp::new();
    let delivered = app.publish("Ladrillos", "Madrid");
    app.publish("Vigas", "Barcelona");
    let request = app.submit(&app.ngo, delivered.id);
    let workflow = &app.services.workflow;
    workflow.approve(&app.company, request.id).unwrap();
    workflow
        .advance(&app.company, request.id, RequestStatus::Completed)
        .unwrap();

    let impact = app.services.dashboard.impact();
    assert_eq!(impact.materials_published, 2);
    assert_eq!(impact.materials_delivered, 1);
    assert_eq!(impact.projects_helped, 1);
    assert_eq!(impact.organizations_helped, 1);
    assert_eq!(impact.material_distribution.len(), 1);
    assert_eq!(impact.material_distribution[0].category, MaterialCategory::Bricks);
    assert_eq!(impact.material_distribution[0].percentage, 100);
    assert_eq!(impact.geographic_impact.len(), 1);
    assert_eq!(impact.geographic_impact[0].city, "Madrid");
    let published: usize = impact.monthly_donations.iter().map(|m| m.published).sum();
    let completed: usize = impact.monthly_donations.iter().map(|m| m.completed).sum();
    assert_eq!((published, completed), (2, 1));
}
