use axum::extract::State;
use ncufoodmap_core::domain::nutrition::{
    ports::NutritionService, value_objects::NutritionDashboard,
};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "nutrition",
    summary = "Nutrition dashboard",
    description = "Average macros, low calorie picks and per restaurant calorie averages.",
    responses(
        (status = 200, body = NutritionDashboard)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Response<NutritionDashboard>, ApiError> {
    let dashboard = state.service.dashboard().await.map_err(ApiError::from)?;

    Ok(Response::OK(dashboard))
}
