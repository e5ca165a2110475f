use axum::extract::State;
use ncufoodmap_core::domain::restaurant::{
    entities::Restaurant, ports::RestaurantService, value_objects::CreateRestaurantInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        restaurant::validators::CreateRestaurantValidator,
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
pub struct CreateRestaurantResponse {
    pub data: Restaurant,
}

#[utoipa::path(
    post,
    path = "",
    tag = "restaurant",
    summary = "Create restaurant",
    description = "Creates a restaurant. The image is uploaded beforehand through the media endpoint.",
    responses(
        (status = 201, body = CreateRestaurantResponse)
    ),
    request_body = CreateRestaurantValidator
)]
pub async fn create_restaurant(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateRestaurantValidator>,
) -> Result<Response<CreateRestaurantResponse>, ApiError> {
    let restaurant = state
        .service
        .create_restaurant(
            identity,
            CreateRestaurantInput {
                name: payload.name,
                address: payload.address,
                phone: payload.phone,
                description: payload.description,
                website: payload.website,
                latitude: payload.latitude,
                longitude: payload.longitude,
                image_url: payload.image_url,
                category_ids: payload.category_ids,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateRestaurantResponse { data: restaurant }))
}
