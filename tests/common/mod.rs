use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use incidencia_api::{
    auth::{AuthConfig, AuthService},
    config::{AppConfig, CredentialPair},
    db::{self, DbConfig},
    entities::zone::Zone,
    events::{self, EventSender},
    handlers::AppServices,
    services::coordinators::CoordinatorInput,
    services::verifiers::VerifierInput,
    services::warehouses::WarehouseInput,
    AppState,
};

const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";

/// Harness spinning up an application backed by an in-memory SQLite
/// database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    token: String,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Constructs a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            TEST_JWT_SECRET.to_string(),
            3600,
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );
        cfg.credentials = vec![
            CredentialPair {
                username: "admin".to_string(),
                password: "admin".to_string(),
                role: "admin".to_string(),
            },
            CredentialPair {
                username: "coordinacion".to_string(),
                password: "coordinacion".to_string(),
                role: "coordinator".to_string(),
            },
        ];

        // A pooled in-memory SQLite database must stay on one connection;
        // every extra connection would see its own empty database.
        let db_cfg = DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("connect to in-memory database");
        db::run_migrations(&pool).await.expect("run migrations");

        let db = Arc::new(pool);

        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let auth_service = AuthService::new(AuthConfig::new(
            cfg.jwt_secret.clone(),
            Duration::from_secs(cfg.jwt_expiration as u64),
            cfg.credentials.clone(),
        ));
        let token = auth_service
            .login("admin", "admin")
            .expect("test login")
            .token;

        let services = AppServices::new(db.clone(), Arc::new(event_sender.clone()));
        let state = AppState {
            db,
            config: cfg,
            event_sender,
            auth_service,
            services,
        };

        let router = incidencia_api::app_router(state.clone());

        Self {
            router,
            state,
            token,
            _event_task: event_task,
        }
    }

    /// Sends an authenticated JSON request through the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        self.router.clone().oneshot(request).await.expect("route request")
    }

    /// Sends an authenticated plain-text request (import bodies).
    pub async fn request_text(&self, method: Method, uri: &str, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from(body.to_string()))
            .expect("build request");

        self.router.clone().oneshot(request).await.expect("route request")
    }

    /// Sends an unauthenticated request.
    pub async fn request_anonymous(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        self.router.clone().oneshot(request).await.expect("route request")
    }

    // Seed helpers going through the services, not raw SQL.

    pub async fn seed_coordinator(&self, name: &str, surnames: &str) -> i32 {
        self.state
            .services
            .coordinators
            .create(CoordinatorInput {
                name: name.to_string(),
                surnames: surnames.to_string(),
            })
            .await
            .expect("seed coordinator")
            .id
    }

    pub async fn seed_verifier(&self, name: &str, surnames: &str, zone: Option<Zone>) -> i32 {
        self.state
            .services
            .verifiers
            .create(VerifierInput {
                name: name.to_string(),
                surnames: surnames.to_string(),
                phone: String::new(),
                zone,
            })
            .await
            .expect("seed verifier")
            .id
    }

    pub async fn seed_warehouse(&self, name: &str, codigo: &str, zone: Option<Zone>) -> i32 {
        self.state
            .services
            .warehouses
            .create(WarehouseInput {
                name: name.to_string(),
                codigo_consejo: codigo.to_string(),
                zone,
            })
            .await
            .expect("seed warehouse")
            .id
    }
}

/// Reads a response body as JSON.
pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response body")
}

/// Asserts status and returns the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    response_json(response).await
}
