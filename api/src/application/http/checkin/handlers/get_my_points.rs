use axum::extract::State;
use ncufoodmap_core::domain::checkin::{ports::CheckinService, value_objects::MyPoints};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/points",
    tag = "checkin",
    summary = "My points",
    description = "All-time and current month check-in counts and points.",
    responses(
        (status = 200, body = MyPoints),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn get_my_points(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<MyPoints>, ApiError> {
    let points = state
        .service
        .my_points(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(points))
}
