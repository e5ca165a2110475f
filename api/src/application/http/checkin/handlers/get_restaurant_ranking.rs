use axum::extract::State;
use ncufoodmap_core::domain::checkin::{
    ports::CheckinService,
    value_objects::{Month, RestaurantRankingBoard},
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
    path = "/restaurants",
    tag = "ranking",
    summary = "Restaurant ranking",
    description = "Top ten restaurant names by check-ins in the month, with their average rating.",
    params(
        ("month" = Option<String>, Query, description = "Month as YYYY-MM, the current month by default"),
    ),
    responses(
        (status = 200, body = RestaurantRankingBoard),
        (status = 400, description = "Invalid month")
    ),
)]
pub async fn get_restaurant_ranking(
    query: QueryParams,
    State(state): State<AppState>,
) -> Result<Response<RestaurantRankingBoard>, ApiError> {
    let month = query
        .text("month")
        .map(|m| Month::parse(&m))
        .transpose()
        .map_err(ApiError::from)?;

    let board = state
        .service
        .restaurant_ranking(month)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(board))
}
