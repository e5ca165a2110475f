use axum::extract::State;
use ncufoodmap_core::domain::restaurant::{entities::Category, ports::RestaurantService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetCategoriesResponse {
    pub data: Vec<Category>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "restaurant",
    summary = "List categories",
    responses(
        (status = 200, body = GetCategoriesResponse)
    ),
)]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Response<GetCategoriesResponse>, ApiError> {
    let categories = state
        .service
        .list_categories()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetCategoriesResponse { data: categories }))
}
