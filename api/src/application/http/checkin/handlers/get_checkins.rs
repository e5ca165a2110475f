use axum::extract::State;
use ncufoodmap_core::domain::checkin::{
    entities::Checkin, ports::CheckinService, value_objects::CheckinFilter,
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
pub struct GetCheckinsResponse {
    pub data: Vec<Checkin>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "checkin",
    summary = "List check-ins",
    description = "The caller's check-ins, newest date first.",
    params(
        ("offset" = Option<u64>, Query, description = "Check-ins to skip"),
        ("limit" = Option<u64>, Query, description = "Page size, 20 by default and at most 100"),
    ),
    responses(
        (status = 200, body = GetCheckinsResponse),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn get_checkins(
    query: QueryParams,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<GetCheckinsResponse>, ApiError> {
    let pagination = query.pagination();
    let checkins = state
        .service
        .list_checkins(
            identity,
            CheckinFilter {
                offset: pagination.offset,
                limit: pagination.limit,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetCheckinsResponse { data: checkins }))
}
