use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::commands::incident_actions::AddIncidentActionCommand;
use crate::commands::incident_records::CreateIncidentRecordCommand;
use crate::entities::incident_record::IncidentStatus;
use crate::errors::ServiceError;
use crate::services::incident_records::IncidentCodeSearch;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionPayload {
    pub action_date: chrono::NaiveDate,
    pub action_description: String,
    pub new_status: Option<IncidentStatus>,
    pub performed_by: i32,
}

async fn create_record(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(command): Json<CreateIncidentRecordCommand>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.incident_records.create(command).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

async fn list_records(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let views = state.services.incident_records.list_views().await?;
    Ok(Json(ApiResponse::success(views)))
}

async fn get_record_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let view = state.services.incident_records.get_details(id).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// All records linked to an incident type code, newest first. An unknown
/// code is a 404; a known code with no records is a 200 with an empty list.
async fn search_by_code(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    match state
        .services
        .incident_records
        .search_by_incident_code(&params.code)
        .await?
    {
        IncidentCodeSearch::UnknownCode => Err(ServiceError::NotFound(format!(
            "No incident type with code \"{}\"",
            params.code
        ))),
        matches @ IncidentCodeSearch::Matches { .. } => Ok(Json(ApiResponse::success(matches))),
    }
}

async fn add_action(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Json(payload): Json<ActionPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let command = AddIncidentActionCommand {
        incident_record_id: id,
        action_date: payload.action_date,
        action_description: payload.action_description,
        new_status: payload.new_status,
        performed_by: payload.performed_by,
    };
    let action = state.services.incident_actions.add(command).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(action))))
}

async fn list_actions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let actions = state.services.incident_actions.list(id).await?;
    Ok(Json(ApiResponse::success(actions)))
}

/// Status as reconstructed from the ledger, cross-checking the stored
/// column when a record is redisplayed.
async fn reconciled_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let status = state.services.incident_actions.reconciled_status(id).await?;
    Ok(Json(ApiResponse::success(status)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_record))
        .route("/", get(list_records))
        .route("/search", get(search_by_code))
        .route("/:id", get(get_record_details))
        .route("/:id/actions", post(add_action))
        .route("/:id/actions", get(list_actions))
        .route("/:id/status", get(reconciled_status))
}
