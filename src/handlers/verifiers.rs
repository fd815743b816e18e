use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::verifiers::VerifierInput;
use crate::{ApiResponse, AppState};

async fn create_verifier(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(input): Json<VerifierInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.verifiers.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

async fn get_verifier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let verifier = state
        .services
        .verifiers
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Verifier {} not found", id)))?;
    Ok(Json(ApiResponse::success(verifier)))
}

async fn update_verifier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Json(input): Json<VerifierInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.verifiers.update(id, input).await?;
    Ok(Json(ApiResponse::success(updated)))
}

async fn list_verifiers(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let verifiers = state.services.verifiers.list().await?;
    Ok(Json(ApiResponse::success(verifiers)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_verifier))
        .route("/", get(list_verifiers))
        .route("/:id", get(get_verifier))
        .route("/:id", put(update_verifier))
}
