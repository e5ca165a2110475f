use axum::extract::{Path, State};
use ncufoodmap_core::domain::nutrition::ports::NutritionService;
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
pub struct DeleteFoodRecordResponse {
    pub message: String,
    pub record_id: Uuid,
}

#[utoipa::path(
    delete,
    path = "/{record_id}",
    tag = "food-record",
    summary = "Delete food record",
    params(
        ("record_id" = Uuid, Path, description = "Food record ID"),
    ),
    responses(
        (status = 200, body = DeleteFoodRecordResponse),
        (status = 404, description = "No such record for the caller")
    ),
)]
pub async fn delete_food_record(
    Path(record_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<DeleteFoodRecordResponse>, ApiError> {
    state
        .service
        .delete_food_record(identity, record_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteFoodRecordResponse {
        message: "Food record deleted".to_string(),
        record_id,
    }))
}
