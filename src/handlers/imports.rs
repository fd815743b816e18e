use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::imports::parse_delimiter;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct ImportParams {
    /// "," (default) or ";"
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    ",".to_string()
}

/// Body is the raw delimited file content.
async fn import_verifiers(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    _user: AuthenticatedUser,
    body: String,
) -> Result<impl IntoResponse, ServiceError> {
    let delimiter = parse_delimiter(&params.separator)?;
    let summary = state
        .services
        .imports
        .import_verifiers(&body, delimiter)
        .await?;
    Ok(Json(ApiResponse::success(summary)))
}

async fn import_warehouses(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    _user: AuthenticatedUser,
    body: String,
) -> Result<impl IntoResponse, ServiceError> {
    let delimiter = parse_delimiter(&params.separator)?;
    let summary = state
        .services
        .imports
        .import_warehouses(&body, delimiter)
        .await?;
    Ok(Json(ApiResponse::success(summary)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/verifiers", post(import_verifiers))
        .route("/warehouses", post(import_warehouses))
}
