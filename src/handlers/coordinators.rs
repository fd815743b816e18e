use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::coordinators::CoordinatorInput;
use crate::{ApiResponse, AppState};

async fn create_coordinator(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(input): Json<CoordinatorInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.coordinators.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

async fn get_coordinator(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let coordinator = state
        .services
        .coordinators
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Coordinator {} not found", id)))?;
    Ok(Json(ApiResponse::success(coordinator)))
}

async fn update_coordinator(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Json(input): Json<CoordinatorInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.coordinators.update(id, input).await?;
    Ok(Json(ApiResponse::success(updated)))
}

async fn list_coordinators(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let coordinators = state.services.coordinators.list().await?;
    Ok(Json(ApiResponse::success(coordinators)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_coordinator))
        .route("/", get(list_coordinators))
        .route("/:id", get(get_coordinator))
        .route("/:id", put(update_coordinator))
}
