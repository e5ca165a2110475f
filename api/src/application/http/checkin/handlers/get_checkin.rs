use axum::extract::{Path, State};
use ncufoodmap_core::domain::checkin::{entities::Checkin, ports::CheckinService};
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{checkin_id}",
    tag = "checkin",
    summary = "Get check-in",
    params(
        ("checkin_id" = Uuid, Path, description = "Check-in ID"),
    ),
    responses(
        (status = 200, body = Checkin),
        (status = 404, description = "No such check-in for the caller")
    ),
)]
pub async fn get_checkin(
    Path(checkin_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<Checkin>, ApiError> {
    let checkin = state
        .service
        .get_checkin(identity, checkin_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(checkin))
}
