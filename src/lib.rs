//! Incidencia API Library
//!
//! Core functionality for the incident-management record keeper: reference
//! entities, incident records, the append-only action ledger and the
//! reporting layer, exposed over HTTP.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod health;
pub mod migrator;
pub mod openapi;
pub mod queries;
pub mod services;

use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::auth::AuthService;
use crate::db::DbPool;
use crate::events::EventSender;
use crate::handlers::AppServices;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub event_sender: EventSender,
    pub auth_service: AuthService,
    pub services: AppServices,
}

// Common response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// Assembles the full application router.
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", handlers::auth::routes())
        .nest("/coordinators", handlers::coordinators::routes())
        .nest("/verifiers", handlers::verifiers::routes())
        .nest("/warehouses", handlers::warehouses::routes())
        .nest("/incident-types", handlers::incident_types::routes())
        .nest("/incident-records", handlers::incident_records::routes())
        .nest("/reports", handlers::reports::routes())
        .nest("/imports", handlers::imports::routes())
        .nest("/exports", handlers::exports::routes())
        .nest("/backup", handlers::backup::routes());

    Router::new()
        .nest("/api/v1", api)
        .nest("/health", health::routes())
        .nest("/api-docs", openapi::routes())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
