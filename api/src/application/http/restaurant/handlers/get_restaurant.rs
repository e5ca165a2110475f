use axum::extract::{Path, State};
use ncufoodmap_core::domain::restaurant::{
    ports::RestaurantService, value_objects::RestaurantDetail,
};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{restaurant_id}",
    tag = "restaurant",
    summary = "Get restaurant",
    description = "Restaurant with its available menu items, newest reviews first and the average rating.",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 200, body = RestaurantDetail),
        (status = 404, description = "Missing or inactive restaurant")
    ),
)]
pub async fn get_restaurant(
    Path(restaurant_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<RestaurantDetail>, ApiError> {
    let detail = state
        .service
        .restaurant_detail(restaurant_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(detail))
}
