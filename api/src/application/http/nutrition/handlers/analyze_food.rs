use axum::extract::State;
use ncufoodmap_core::domain::nutrition::{
    ports::NutritionService, value_objects::FoodAnalysisOutput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        nutrition::validators::AnalyzeFoodValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "nutrition",
    summary = "Analyze a meal",
    description = "Estimates calories and macros of a free-text meal description and suggests a record name.",
    responses(
        (status = 200, body = FoodAnalysisOutput),
        (status = 401, description = "Not authenticated"),
        (status = 502, description = "Completion provider failed")
    ),
    request_body = AnalyzeFoodValidator
)]
pub async fn analyze_food(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<AnalyzeFoodValidator>,
) -> Result<Response<FoodAnalysisOutput>, ApiError> {
    let output = state
        .service
        .analyze_food(identity, payload.description)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(output))
}
