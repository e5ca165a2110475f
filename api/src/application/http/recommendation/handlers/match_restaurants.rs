use axum::extract::State;
use ncufoodmap_core::domain::recommendation::{
    ports::RecommendationService, value_objects::MatchOutput,
};

use crate::application::http::{
    recommendation::validators::RecommendationQueryValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/match",
    tag = "recommendation",
    summary = "Match restaurants",
    description = "Extracts cuisine and food keywords from the query, matches local restaurants and tops up with nearby places. Extraction or search failures are reported in the error field.",
    responses(
        (status = 200, body = MatchOutput)
    ),
    request_body = RecommendationQueryValidator
)]
pub async fn match_restaurants(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RecommendationQueryValidator>,
) -> Result<Response<MatchOutput>, ApiError> {
    let output = state
        .service
        .match_restaurants(payload.query)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(output))
}
