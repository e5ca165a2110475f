use axum::extract::State;
use ncufoodmap_core::domain::nutrition::{
    entities::FoodRecord, ports::NutritionService, value_objects::CreateFoodRecordInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        nutrition::validators::CreateFoodRecordValidator,
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
pub struct CreateFoodRecordResponse {
    pub data: FoodRecord,
}

#[utoipa::path(
    post,
    path = "",
    tag = "food-record",
    summary = "Create food record",
    responses(
        (status = 201, body = CreateFoodRecordResponse),
        (status = 401, description = "Not authenticated")
    ),
    request_body = CreateFoodRecordValidator
)]
pub async fn create_food_record(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateFoodRecordValidator>,
) -> Result<Response<CreateFoodRecordResponse>, ApiError> {
    let record = state
        .service
        .create_food_record(
            identity,
            CreateFoodRecordInput {
                name: payload.name,
                description: payload.description,
                calories: payload.calories,
                protein: payload.protein,
                carbs: payload.carbs,
                fat: payload.fat,
                image_url: payload.image_url,
                consumed_at: payload.consumed_at,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateFoodRecordResponse { data: record }))
}
