use axum::extract::State;
use ncufoodmap_core::domain::checkin::{
    entities::Checkin, ports::CheckinService, value_objects::CreateCheckinInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        checkin::validators::CreateCheckinValidator,
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
pub struct CreateCheckinResponse {
    pub data: Checkin,
}

#[utoipa::path(
    post,
    path = "",
    tag = "checkin",
    summary = "Create check-in",
    description = "Adds a meal to the caller's diary.",
    responses(
        (status = 201, body = CreateCheckinResponse),
        (status = 400, description = "Invalid check-in"),
        (status = 401, description = "Not authenticated")
    ),
    request_body = CreateCheckinValidator
)]
pub async fn create_checkin(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateCheckinValidator>,
) -> Result<Response<CreateCheckinResponse>, ApiError> {
    let checkin = state
        .service
        .create_checkin(
            identity,
            CreateCheckinInput {
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

    Ok(Response::Created(CreateCheckinResponse { data: checkin }))
}
