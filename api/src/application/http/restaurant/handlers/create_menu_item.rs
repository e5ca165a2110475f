use axum::extract::{Path, State};
use ncufoodmap_core::domain::restaurant::{
    entities::MenuItem, ports::RestaurantService, value_objects::CreateMenuItemInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        restaurant::validators::CreateMenuItemValidator,
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
pub struct CreateMenuItemResponse {
    pub data: MenuItem,
}

#[utoipa::path(
    post,
    path = "/{restaurant_id}/menu-items",
    tag = "restaurant",
    summary = "Create menu item",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant ID"),
    ),
    responses(
        (status = 201, body = CreateMenuItemResponse),
        (status = 404, description = "Restaurant not found")
    ),
    request_body = CreateMenuItemValidator
)]
pub async fn create_menu_item(
    Path(restaurant_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateMenuItemValidator>,
) -> Result<Response<CreateMenuItemResponse>, ApiError> {
    let menu_item = state
        .service
        .create_menu_item(
            identity,
            CreateMenuItemInput {
                restaurant_id,
                name: payload.name,
                description: payload.description,
                price: payload.price,
                image_url: payload.image_url,
                is_vegetarian: payload.is_vegetarian,
                is_spicy: payload.is_spicy,
                is_available: payload.is_available,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateMenuItemResponse { data: menu_item }))
}
