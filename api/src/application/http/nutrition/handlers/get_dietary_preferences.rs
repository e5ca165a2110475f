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
pub struct GetDietaryPreferencesResponse {
    pub data: Vec<PreferenceGroup>,
}

#[utoipa::path(
    get,
    path = "/dietary-preferences",
    tag = "nutrition",
    summary = "Dietary preferences",
    description = "Diet preferences with compatible available menu items.",
    responses(
        (status = 200, body = GetDietaryPreferencesResponse)
    ),
)]
pub async fn get_dietary_preferences(
    State(state): State<AppState>,
) -> Result<Response<GetDietaryPreferencesResponse>, ApiError> {
    let groups = state.service.dietary_preferences().await.map_err(ApiError::from)?;

    Ok(Response::OK(GetDietaryPreferencesResponse { data: groups }))
}
