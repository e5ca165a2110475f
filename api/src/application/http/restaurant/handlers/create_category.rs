use axum::extract::State;
use ncufoodmap_core::domain::restaurant::{
    entities::Category, ports::RestaurantService, value_objects::CreateCategoryInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        restaurant::validators::CreateCategoryValidator,
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
pub struct CreateCategoryResponse {
    pub data: Category,
}

#[utoipa::path(
    post,
    path = "",
    tag = "restaurant",
    summary = "Create category",
    responses(
        (status = 201, body = CreateCategoryResponse)
    ),
    request_body = CreateCategoryValidator
)]
pub async fn create_category(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateCategoryValidator>,
) -> Result<Response<CreateCategoryResponse>, ApiError> {
    let category = state
        .service
        .create_category(
            identity,
            CreateCategoryInput {
                name: payload.name,
                icon: payload.icon,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateCategoryResponse { data: category }))
}
