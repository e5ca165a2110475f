use axum::extract::{Path, State};
use ncufoodmap_core::domain::checkin::ports::CheckinService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteCheckinResponse {
    pub message: String,
    pub checkin_id: Uuid,
}

#[utoipa::path(
    delete,
    path = "/{checkin_id}",
    tag = "checkin",
    summary = "Delete check-in",
    params(
        ("checkin_id" = Uuid, Path, description = "Check-in ID"),
    ),
    responses(
        (status = 200, body = DeleteCheckinResponse),
        (status = 404, description = "No such check-in for the caller")
    ),
)]
pub async fn delete_checkin(
    Path(checkin_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<DeleteCheckinResponse>, ApiError> {
    state
        .service
        .delete_checkin(identity, checkin_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteCheckinResponse {
        message: "Check-in deleted".to_string(),
        checkin_id,
    }))
}
