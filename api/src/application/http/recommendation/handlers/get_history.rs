use axum::extract::State;
use ncufoodmap_core::domain::recommendation::{
    entities::AiRecommendation, ports::RecommendationService,
    value_objects::HISTORY_DEFAULT_LIMIT,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    query_params::{MAX_LIMIT, QueryParams},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetHistoryResponse {
    pub data: Vec<AiRecommendation>,
}

#[utoipa::path(
    get,
    path = "/history",
    tag = "recommendation",
    summary = "Recommendation history",
    description = "Most recent recommendation log rows, newest first.",
    params(
        ("limit" = Option<u64>, Query, description = "Rows to return, 20 by default and at most 100"),
    ),
    responses(
        (status = 200, body = GetHistoryResponse)
    ),
)]
pub async fn get_history(
    query: QueryParams,
    State(state): State<AppState>,
) -> Result<Response<GetHistoryResponse>, ApiError> {
    let limit = query
        .parsed::<u64>("limit")
        .unwrap_or(HISTORY_DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT);

    let history = state
        .service
        .history(limit)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetHistoryResponse { data: history }))
}
