use axum::extract::State;
use ncufoodmap_core::domain::checkin::{ports::CheckinService, value_objects::CalendarEvent};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/calendar",
    tag = "checkin",
    summary = "Check-in calendar",
    description = "One calendar event per check-in of the caller.",
    responses(
        (status = 200, body = Vec<CalendarEvent>),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<Vec<CalendarEvent>>, ApiError> {
    let events = state
        .service
        .calendar(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(events))
}
