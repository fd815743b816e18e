mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{expect_json, TestApp};
use incidencia_api::entities::zone::Zone;

struct Fixture {
    registering: i32,
    assigned: i32,
    warehouse_a: i32,
    warehouse_b: i32,
    verifier_a: i32,
    verifier_b: i32,
    type_id: i64,
}

async fn seed_fixture(app: &TestApp) -> Fixture {
    let registering = app.seed_coordinator("Marta", "Vila").await;
    let assigned = app.seed_coordinator("Joan", "Ferrer").await;
    let warehouse_a = app
        .seed_warehouse("Bodega Cooperativa", "CC-0101", Some(Zone::Penedes))
        .await;
    let warehouse_b = app
        .seed_warehouse("Celler del Camp", "CC-0202", Some(Zone::Conca))
        .await;
    let verifier_a = app
        .seed_verifier("Jordi", "Pons", Some(Zone::Penedes))
        .await;
    let verifier_b = app.seed_verifier("Anna", "Roca", Some(Zone::Conca)).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Retraso en la verificación" })),
        )
        .await;
    let body = expect_json(response, StatusCode::CREATED).await;

    Fixture {
        registering,
        assigned,
        warehouse_a,
        warehouse_b,
        verifier_a,
        verifier_b,
        type_id: body["data"]["id"].as_i64().unwrap(),
    }
}

async fn seed_record(
    app: &TestApp,
    fx: &Fixture,
    date: &str,
    warehouse: i32,
    verifier: i32,
    status: &str,
    responsible: &str,
) {
    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-records",
            Some(json!({
                "date": date,
                "registering_coordinator_id": fx.registering,
                "warehouse_id": warehouse,
                "causing_verifier_id": verifier,
                "incident_type_id": fx.type_id,
                "assigned_coordinator_id": fx.assigned,
                "explanation": "",
                "status": status,
                "responsible": responsible
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn counts_by_status_groups_correctly() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    seed_record(&app, &fx, "2026-07-01", fx.warehouse_a, fx.verifier_a, "Pendiente", "Bodega").await;
    seed_record(&app, &fx, "2026-07-02", fx.warehouse_a, fx.verifier_b, "Pendiente", "Bodega").await;
    seed_record(&app, &fx, "2026-07-03", fx.warehouse_b, fx.verifier_a, "Solucionado", "Bodega")
        .await;

    let response = app
        .request(Method::GET, "/api/v1/reports/counts?by=status", None)
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert!(groups
        .iter()
        .any(|g| g["key"] == "Pendiente" && g["count"] == 2));
    assert!(groups
        .iter()
        .any(|g| g["key"] == "Solucionado" && g["count"] == 1));
}

#[tokio::test]
async fn counts_by_zone_and_warehouse() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    seed_record(&app, &fx, "2026-07-01", fx.warehouse_a, fx.verifier_a, "Pendiente", "Bodega").await;
    seed_record(&app, &fx, "2026-07-02", fx.warehouse_a, fx.verifier_a, "Pendiente", "Bodega").await;
    seed_record(&app, &fx, "2026-07-03", fx.warehouse_b, fx.verifier_a, "Pendiente", "Bodega").await;

    let response = app
        .request(Method::GET, "/api/v1/reports/counts?by=warehouse_zone", None)
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    let groups = body["data"].as_array().unwrap();
    assert!(groups.iter().any(|g| g["key"] == "PENEDES" && g["count"] == 2));
    assert!(groups.iter().any(|g| g["key"] == "CONCA" && g["count"] == 1));

    let response = app
        .request(Method::GET, "/api/v1/reports/counts?by=warehouse", None)
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    let groups = body["data"].as_array().unwrap();
    assert!(groups
        .iter()
        .any(|g| g["key"] == "Bodega Cooperativa" && g["count"] == 2));
}

#[tokio::test]
async fn assignments_by_verifier_filters_responsible() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    seed_record(&app, &fx, "2026-07-01", fx.warehouse_a, fx.verifier_a, "Pendiente", "Verificador")
        .await;
    seed_record(&app, &fx, "2026-07-02", fx.warehouse_a, fx.verifier_a, "Pendiente", "Bodega")
        .await;
    seed_record(&app, &fx, "2026-07-03", fx.warehouse_a, fx.verifier_b, "Pendiente", "Verificador")
        .await;

    let response = app
        .request(
            Method::GET,
            "/api/v1/reports/assignments-by-verifier",
            None,
        )
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert!(groups
        .iter()
        .any(|g| g["key"] == "Jordi Pons" && g["count"] == 1));
    assert!(groups
        .iter()
        .any(|g| g["key"] == "Anna Roca" && g["count"] == 1));
}

#[tokio::test]
async fn dashboard_stats_split_pending_and_resolved() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    seed_record(&app, &fx, "2026-07-01", fx.warehouse_a, fx.verifier_a, "Pendiente", "Bodega").await;
    seed_record(&app, &fx, "2026-07-02", fx.warehouse_a, fx.verifier_a, "En Proceso", "Bodega")
        .await;
    seed_record(&app, &fx, "2026-07-03", fx.warehouse_b, fx.verifier_b, "Solucionado", "Bodega")
        .await;

    let response = app
        .request(Method::GET, "/api/v1/reports/dashboard", None)
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    let stats = &body["data"];
    assert_eq!(stats["total_records"], 3);
    assert_eq!(stats["pending_records"], 2);
    assert_eq!(stats["resolved_records"], 1);
}

#[tokio::test]
async fn activity_feed_lists_pending_newest_first_and_latest_actions() {
    let app = TestApp::new().await;
    let fx = seed_fixture(&app).await;

    // 12 pending records; the feed caps at 10, newest first.
    for day in 1..=12 {
        seed_record(
            &app,
            &fx,
            &format!("2026-07-{:02}", day),
            fx.warehouse_a,
            fx.verifier_a,
            "Pendiente",
            "Bodega",
        )
        .await;
    }
    seed_record(&app, &fx, "2026-07-20", fx.warehouse_b, fx.verifier_b, "Solucionado", "Bodega")
        .await;

    // 6 ledger entries against record 1; the feed keeps the 5 latest.
    for day in 1..=6 {
        let response = app
            .request(
                Method::POST,
                "/api/v1/incident-records/1/actions",
                Some(json!({
                    "action_date": format!("2026-08-{:02}", day),
                    "action_description": format!("Seguimiento {}", day),
                    "performed_by": fx.registering
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .request(Method::GET, "/api/v1/reports/activity", None)
        .await;
    let body = expect_json(response, StatusCode::OK).await;

    let pending = body["data"]["pending"].as_array().unwrap();
    assert_eq!(pending.len(), 10);
    assert_eq!(pending[0]["date"], "2026-07-12");
    assert!(pending.iter().all(|p| p["status"] != "Solucionado"));

    let actions = body["data"]["recent_actions"].as_array().unwrap();
    assert_eq!(actions.len(), 5);
    assert_eq!(actions[0]["action_date"], "2026-08-06");
}
