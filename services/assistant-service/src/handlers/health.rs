use axum::{extract::State, response::Json};

use crate::config::{AppState, HealthCheckResponse};

/// Service and dependency status
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Health status", body = HealthCheckResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(state.health_check().await)
}
