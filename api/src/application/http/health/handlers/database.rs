use axum::extract::State;
use ncufoodmap_core::domain::health::ports::HealthCheckService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DatabaseHealthResponse {
    pub response_time_ms: u64,
}

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Database round trip",
    responses(
        (status = 200, body = DatabaseHealthResponse),
        (status = 503, description = "Database unreachable")
    ),
)]
pub async fn database_health(
    State(state): State<AppState>,
) -> Result<Response<DatabaseHealthResponse>, ApiError> {
    let response_time_ms = state.service.health().await.map_err(ApiError::from)?;

    Ok(Response::OK(DatabaseHealthResponse { response_time_ms }))
}
