use axum::extract::State;
use ncufoodmap_core::domain::checkin::{
    ports::CheckinService,
    value_objects::{Month, UserRankingBoard},
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
    path = "/users",
    tag = "ranking",
    summary = "User ranking",
    description = "Top ten users by check-ins in the month.",
    params(
        ("month" = Option<String>, Query, description = "Month as YYYY-MM, the current month by default"),
    ),
    responses(
        (status = 200, body = UserRankingBoard),
        (status = 400, description = "Invalid month")
    ),
)]
pub async fn get_user_ranking(
    query: QueryParams,
    State(state): State<AppState>,
) -> Result<Response<UserRankingBoard>, ApiError> {
    let month = query
        .text("month")
        .map(|m| Month::parse(&m))
        .transpose()
        .map_err(ApiError::from)?;

    let board = state
        .service
        .user_ranking(month)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(board))
}
