mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{expect_json, TestApp};

#[tokio::test]
async fn auto_codes_are_sequential_and_zero_padded() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Retraso en la verificación" })),
        )
        .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(body["data"]["code"], "001");

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Documentación incompleta" })),
        )
        .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(body["data"]["code"], "002");
}

#[tokio::test]
async fn auto_allocation_skips_past_custom_codes() {
    let app = TestApp::new().await;

    for description in ["Retraso en la verificación", "Documentación incompleta"] {
        let response = app
            .request(
                Method::POST,
                "/api/v1/incident-types",
                Some(json!({ "description": description })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({
                "description": "Incidencia especial de campaña",
                "custom_code": "CUSTOM-X"
            })),
        )
        .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(body["data"]["code"], "CUSTOM-X");

    // Existing codes {"001","002","CUSTOM-X"}: the custom code does not
    // advance the sequence, so the next auto code is "003".
    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Error en el etiquetado" })),
        )
        .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(body["data"]["code"], "003");
}

#[tokio::test]
async fn auto_allocation_probes_past_collisions() {
    let app = TestApp::new().await;

    // Occupy the code the counter would propose next: one row exists, so
    // the naive proposal is "002" — taken. The allocator must move on.
    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Retraso en la verificación" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Código reservado manualmente", "custom_code": "002" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Error en el etiquetado" })),
        )
        .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(body["data"]["code"], "003");
}

#[tokio::test]
async fn custom_code_length_bounds() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Incidencia con código corto", "custom_code": "AB" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Incidencia con código válido", "custom_code": "ABC" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_custom_code_conflicts_naming_the_code() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Incidencia con código válido", "custom_code": "ABC" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Otra incidencia distinta", "custom_code": "ABC" })),
        )
        .await;
    let body = expect_json(response, StatusCode::CONFLICT).await;
    assert!(body["message"].as_str().unwrap().contains("ABC"));
}

#[tokio::test]
async fn short_description_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "corta" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn allocate_code_dry_run_does_not_persist() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/v1/incident-types/allocate-code", None)
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"], "001");

    // Nothing was written, so the same proposal comes back.
    let response = app
        .request(Method::GET, "/api/v1/incident-types/allocate-code", None)
        .await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"], "001");

    // Vetting a taken custom code reports the conflict without writing.
    let response = app
        .request(
            Method::POST,
            "/api/v1/incident-types",
            Some(json!({ "description": "Incidencia con código válido", "custom_code": "ABC" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::GET,
            "/api/v1/incident-types/allocate-code?code=ABC",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
