use axum::extract::{Path, State};
use ncufoodmap_core::domain::restaurant::{
    entities::Restaurant, ports::RestaurantService, value_objects::UpdateRestaurantInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        restaurant::validators::UpdateRestaurantValidator,
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
pub struct UpdateRestaurantResponse {
    pub data: Restaurant,
}

#[utoipa::path(
    put,
    path = "/{restaurant_id}",
    tag = "restaurant",
    summary = "Update restaurant",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 200, body = UpdateRestaurantResponse),
        (status = 404, description = "Restaurant not found")
    ),
    request_body = UpdateRestaurantValidator
)]
pub async fn update_restaurant(
    Path(restaurant_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateRestaurantValidator>,
) -> Result<Response<UpdateRestaurantResponse>, ApiError> {
    let restaurant = state
        .service
        .update_restaurant(
            identity,
            UpdateRestaurantInput {
                restaurant_id,
                name: payload.name,
                address: payload.address,
                phone: payload.phone,
                description: payload.description,
                website: payload.website,
                latitude: payload.latitude,
                longitude: payload.longitude,
                image_url: payload.image_url,
                is_active: payload.is_active,
                category_ids: payload.category_ids,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateRestaurantResponse { data: restaurant }))
}
