use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::backup::BackupDocument;
use crate::{ApiResponse, AppState};

async fn snapshot(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let document = state.services.backup.snapshot().await?;
    Ok(Json(document))
}

async fn restore(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(document): Json<BackupDocument>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.backup.restore(document).await?;
    Ok(Json(ApiResponse::success("restored")))
}

/// Purges every table. Admin-only: meant for test-data teardown.
async fn reset(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    if user.role != "admin" {
        return Err(ServiceError::Forbidden(
            "Reset requires the admin role".to_string(),
        ));
    }
    state.services.backup.reset().await?;
    Ok(Json(ApiResponse::success("reset")))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(snapshot))
        .route("/restore", post(restore))
        .route("/reset", post(reset))
}
