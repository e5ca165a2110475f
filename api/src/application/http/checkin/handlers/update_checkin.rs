use axum::extract::{Path, State};
use ncufoodmap_core::domain::checkin::{
    entities::Checkin, ports::CheckinService, value_objects::UpdateCheckinInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        checkin::validators::UpdateCheckinValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateCheckinResponse {
    pub data: Checkin,
}

#[utoipa::path(
    put,
    path = "/{checkin_id}",
    tag = "checkin",
    summary = "Update check-in",
    params(
        ("checkin_id" = Uuid, Path, description = "Check-in ID"),
    ),
    responses(
        (status = 200, body = UpdateCheckinResponse),
        (status = 404, description = "No such check-in for the caller")
    ),
    request_body = UpdateCheckinValidator
)]
pub async fn update_checkin(
    Path(checkin_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateCheckinValidator>,
) -> Result<Response<UpdateCheckinResponse>, ApiError> {
    let checkin = state
        .service
        .update_checkin(
            identity,
            UpdateCheckinInput {
                checkin_id,
                date: payload.date,
                restaurant_name: payload.restaurant_name,
                item: payload.item,
                price: payload.price,
                rating: payload.rating,
                mood: payload.mood,
                comment: payload.comment,
                photo_url: payload.photo_url,
                latitude: payload.latitude,
                longitude: payload.longitude,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateCheckinResponse { data: checkin }))
}
