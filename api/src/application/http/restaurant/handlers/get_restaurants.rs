use axum::extract::State;
use ncufoodmap_core::domain::restaurant::{
    ports::RestaurantService,
    value_objects::{RestaurantFilter, RestaurantPage},
};

use crate::application::http::{
    query_params::QueryParams,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "restaurant",
    summary = "List restaurants",
    description = "Active restaurants by name, 12 per page. Unparseable filters are ignored and the page is clamped into range.",
    params(
        ("category" = Option<Uuid>, Query, description = "Category ID"),
        ("min_rating" = Option<f64>, Query, description = "Minimum average rating"),
        ("q" = Option<String>, Query, description = "Text contained in the name or address"),
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
    ),
    responses(
        (status = 200, body = RestaurantPage)
    ),
)]
pub async fn get_restaurants(
    query: QueryParams,
    State(state): State<AppState>,
) -> Result<Response<RestaurantPage>, ApiError> {
    let page = state
        .service
        .list_restaurants(RestaurantFilter {
            category_id: query.parsed("category"),
            min_rating: query.parsed("min_rating"),
            name_or_address: query.text("q"),
            page: query.parsed("page"),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(page))
}
