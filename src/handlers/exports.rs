use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use serde::Serialize;
use std::path::Path;
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::{ApiResponse, AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct ExportResult {
    pub filename: String,
}

/// Writes the two-sheet history workbook into the working directory and
/// returns its name.
async fn export_history(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let path = state.services.exports.export_history(Path::new(".")).await?;
    Ok(Json(ApiResponse::success(ExportResult {
        filename: path.to_string_lossy().into_owned(),
    })))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/history", post(export_history))
}
