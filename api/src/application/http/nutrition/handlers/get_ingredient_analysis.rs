use axum::extract::State;
use ncufoodmap_core::domain::nutrition::{
    ports::NutritionService, value_objects::IngredientUsage,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetIngredientAnalysisResponse {
    pub data: Vec<IngredientUsage>,
}

#[utoipa::path(
    get,
    path = "/ingredients",
    tag = "nutrition",
    summary = "Ingredient analysis",
    description = "The ten most used ingredients with sample menu items and usage counts.",
    responses(
        (status = 200, body = GetIngredientAnalysisResponse)
    ),
)]
pub async fn get_ingredient_analysis(
    State(state): State<AppState>,
) -> Result<Response<GetIngredientAnalysisResponse>, ApiError> {
    let usages = state
        .service
        .ingredient_analysis()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetIngredientAnalysisResponse { data: usages }))
}
