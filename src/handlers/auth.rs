use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let response = state
        .auth_service
        .login(&payload.username, &payload.password)?;
    Ok(Json(response))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
