use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::errors::ServiceError;
use crate::services::reports::GroupDimension;
use crate::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct CountsParams {
    pub by: GroupDimension,
}

async fn counts(
    State(state): State<AppState>,
    Query(params): Query<CountsParams>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let groups = state.services.reports.counts_by(params.by).await?;
    Ok(Json(ApiResponse::success(groups)))
}

async fn assignments_by_verifier(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let groups = state.services.reports.assignments_by_verifier().await?;
    Ok(Json(ApiResponse::success(groups)))
}

async fn dashboard(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.services.reports.dashboard_stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

async fn activity(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ServiceError> {
    let feed = state.services.reports.activity_feed().await?;
    Ok(Json(ApiResponse::success(feed)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/counts", get(counts))
        .route("/assignments-by-verifier", get(assignments_by_verifier))
        .route("/dashboard", get(dashboard))
        .route("/activity", get(activity))
}
