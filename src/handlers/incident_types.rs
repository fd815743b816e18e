use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::commands::incident_types::CreateIncidentTypeCommand;
use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct AllocateCodeParams {
    /// Custom code to vet; omitted for sequential allocation.
    pub code: Option<String>,
}

async fn create_incident_type(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(command): Json<CreateIncidentTypeCommand>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.incident_types.create(command).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

async fn get_incident_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let incident_type = state
        .services
        .incident_types
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Incident type {} not found", id)))?;
    Ok(Json(ApiResponse::success(incident_type)))
}

async fn list_incident_types(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let incident_types = state.services.incident_types.list().await?;
    Ok(Json(ApiResponse::success(incident_types)))
}

/// Dry-run allocation: vets a custom code or previews the next sequential
/// one without persisting anything.
async fn allocate_code(
    State(state): State<AppState>,
    Query(params): Query<AllocateCodeParams>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let code = state
        .services
        .incident_types
        .allocate_code(params.code.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(code)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_incident_type))
        .route("/", get(list_incident_types))
        .route("/allocate-code", get(allocate_code))
        .route("/:id", get(get_incident_type))
}
