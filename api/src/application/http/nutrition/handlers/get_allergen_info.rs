use axum::extract::State;
use ncufoodmap_core::domain::nutrition::{
    ports::NutritionService, value_objects::PreferenceGroup,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetAllergenInfoResponse {
    pub data: Vec<PreferenceGroup>,
}

#[utoipa::path(
    get,
    path = "/allergens",
    tag = "nutrition",
    summary = "Allergen information",
    description = "Allergies with the available menu items marked incompatible.",
    responses(
        (status = 200, body = GetAllergenInfoResponse)
    ),
)]
pub async fn get_allergen_info(
    State(state): State<AppState>,
) -> Result<Response<GetAllergenInfoResponse>, ApiError> {
    let groups = state.service.allergen_info().await.map_err(ApiError::from)?;

    Ok(Response::OK(GetAllergenInfoResponse { data: groups }))
}
