use axum::extract::State;
use ncufoodmap_core::domain::nutrition::{ports::NutritionService, value_objects::NutritionAdvice};

use crate::application::http::{
    nutrition::validators::NutritionAdviceValidator,
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
    path = "/advice",
    tag = "nutrition",
    summary = "Ask for nutrition advice",
    description = "Answers the question with the nutritionist model and suggests up to three menu items.",
    responses(
        (status = 200, body = NutritionAdvice),
        (status = 502, description = "Completion provider failed")
    ),
    request_body = NutritionAdviceValidator
)]
pub async fn nutrition_advice(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<NutritionAdviceValidator>,
) -> Result<Response<NutritionAdvice>, ApiError> {
    let advice = state
        .service
        .nutrition_advice(payload.question)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(advice))
}
