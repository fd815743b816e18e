mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{expect_json, response_json, TestApp};
use incidencia_api::entities::zone::Zone;

async fn seed_minimal_dataset(app: &TestApp) {
    let registering = app.seed_coordinator("Marta", "Vila").await;
    let assigned = app.seed_coordinator("Joan", "Ferrer").await;
    let warehouse = app
        .seed_warehouse("Bodega Cooperativa", "CC-0101", Some(Zone::Penedes))
        .await;
    let verifier = app.seed_verifier("Jordi", "Pons", None).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Retraso en la verificación" })),
        )
        .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    let type_id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-records",
            Some(json!({
                "date": "2026-07-01",
                "registering_coordinator_id": registering,
                "warehouse_id": warehouse,
                "causing_verifier_id": verifier,
                "incident_type_id": type_id,
                "assigned_coordinator_id": assigned,
                "explanation": "Partida retenida",
                "status": "Pendiente",
                "responsible": "Bodega"
            })),
        )
        .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    let record_id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/incident-records/{}/actions", record_id),
            Some(json!({
                "action_date": "2026-07-02",
                "action_description": "Revisión inicial",
                "new_status": "En Proceso",
                "performed_by": registering
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn backup_reset_restore_round_trip() {
    let app = TestApp::new().await;
    seed_minimal_dataset(&app).await;

    // Snapshot all six tables.
    let response = app.request(Method::GET, "/api/v1/backup", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let snapshot = response_json(response).await;
    assert_eq!(snapshot["coordinators"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["incident_records"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["incident_actions"].as_array().unwrap().len(), 1);

    // Purge everything.
    let response = app.request(Method::POST, "/api/v1/backup/reset", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/api/v1/backup", None).await;
    let emptied = response_json(response).await;
    assert_eq!(emptied["coordinators"].as_array().unwrap().len(), 0);
    assert_eq!(emptied["incident_records"].as_array().unwrap().len(), 0);

    // Reload the snapshot.
    let response = app
        .request(Method::POST, "/api/v1/backup/restore", Some(snapshot.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/api/v1/backup", None).await;
    let restored = response_json(response).await;
    assert_eq!(restored, snapshot);

    // Joined views resolve again after the restore.
    let response = app.request(Method::GET, "/api/v1/incident-records", None).await;
    let body = expect_json(response, StatusCode::OK).await;
    let views = body["data"].as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["registering_coordinator"], "Marta Vila");
    // The ledger entry flipped the status before the snapshot was taken.
    assert_eq!(views[0]["status"], "En Proceso");
}

#[tokio::test]
async fn reset_requires_admin_role() {
    let app = TestApp::new().await;

    // Open a coordinator-role session.
    let response = app
        .request_anonymous(
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({ "username": "coordinacion", "password": "coordinacion" })),
        )
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    let token = body["token"].as_str().unwrap().to_string();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/backup/reset")
        .header(axum::http::header::AUTHORIZATION, format!("Bearer {}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(
        incidencia_api::app_router(app.state.clone()),
        request,
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
