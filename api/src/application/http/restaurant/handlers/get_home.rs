use axum::extract::State;
use ncufoodmap_core::domain::restaurant::{ports::RestaurantService, value_objects::HomeOverview};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/home",
    tag = "restaurant",
    summary = "Home page data",
    description = "Top rated active restaurants and every category.",
    responses(
        (status = 200, body = HomeOverview)
    ),
)]
pub async fn get_home(State(state): State<AppState>) -> Result<Response<HomeOverview>, ApiError> {
    let home = state.service.home().await.map_err(ApiError::from)?;

    Ok(Response::OK(home))
}
