use axum::extract::State;
use ncufoodmap_core::domain::checkin::{ports::CheckinService, value_objects::MapMarker};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/map",
    tag = "checkin",
    summary = "Check-in map",
    description = "Markers for the caller's check-ins that have coordinates.",
    responses(
        (status = 200, body = Vec<MapMarker>),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn get_map_markers(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<Vec<MapMarker>>, ApiError> {
    let markers = state
        .service
        .map_markers(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(markers))
}
