use axum::{response::IntoResponse, routing::get, Json, Router};
use utoipa::OpenApi;

use crate::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Incidencia API",
        description = "Incident lifecycle management for warehouses, verifiers and coordinators"
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::entities::incident_record::IncidentStatus,
        crate::entities::incident_record::Responsible,
        crate::entities::zone::Zone,
        crate::services::coordinators::CoordinatorInput,
        crate::services::verifiers::VerifierInput,
        crate::services::warehouses::WarehouseInput,
        crate::commands::incident_types::CreateIncidentTypeCommand,
        crate::commands::incident_records::CreateIncidentRecordCommand,
        crate::commands::incident_actions::AddIncidentActionCommand,
        crate::queries::IncidentRecordView,
        crate::queries::IncidentActionView,
        crate::services::reports::GroupCount,
        crate::services::reports::DashboardStats,
        crate::services::imports::ImportSummary,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}
