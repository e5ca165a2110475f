use axum::extract::State;
use ncufoodmap_core::domain::restaurant::{
    ports::RestaurantService, value_objects::SearchSuggestions,
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
    path = "/suggestions",
    tag = "restaurant",
    summary = "Search suggestions",
    description = "Restaurants and categories matching the typed text. Fewer than two characters yields no suggestions.",
    params(
        ("q" = Option<String>, Query, description = "Typed text"),
    ),
    responses(
        (status = 200, body = SearchSuggestions)
    ),
)]
pub async fn search_suggestions(
    query: QueryParams,
    State(state): State<AppState>,
) -> Result<Response<SearchSuggestions>, ApiError> {
    let suggestions = state
        .service
        .search_suggestions(query.text("q").unwrap_or_default())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(suggestions))
}
