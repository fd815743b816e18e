use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::warehouses::WarehouseInput;
use crate::{ApiResponse, AppState};

async fn create_warehouse(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(input): Json<WarehouseInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.warehouses.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouse = state
        .services
        .warehouses
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {} not found", id)))?;
    Ok(Json(ApiResponse::success(warehouse)))
}

async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _user: AuthenticatedUser,
    Json(input): Json<WarehouseInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.warehouses.update(id, input).await?;
    Ok(Json(ApiResponse::success(updated)))
}

async fn list_warehouses(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouses = state.services.warehouses.list().await?;
    Ok(Json(ApiResponse::success(warehouses)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_warehouse))
        .route("/", get(list_warehouses))
        .route("/:id", get(get_warehouse))
        .route("/:id", put(update_warehouse))
}
