use axum::extract::State;
use ncufoodmap_core::domain::nutrition::{
    entities::FoodRecord, ports::NutritionService, value_objects::FoodRecordFilter,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        query_params::QueryParams,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetFoodRecordsResponse {
    pub data: Vec<FoodRecord>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "food-record",
    summary = "List food records",
    description = "The caller's food records, most recently consumed first.",
    params(
        ("offset" = Option<u64>, Query, description = "Records to skip"),
        ("limit" = Option<u64>, Query, description = "Page size, 20 by default and at most 100"),
    ),
    responses(
        (status = 200, body = GetFoodRecordsResponse),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn get_food_records(
    query: QueryParams,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<GetFoodRecordsResponse>, ApiError> {
    let pagination = query.pagination();
    let records = state
        .service
        .list_food_records(
            identity,
            FoodRecordFilter {
                offset: pagination.offset,
                limit: pagination.limit,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetFoodRecordsResponse { data: records }))
}
