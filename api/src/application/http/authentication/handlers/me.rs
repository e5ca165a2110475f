use axum::extract::State;
use ncufoodmap_core::domain::authentication::{ports::AuthService, value_objects::MeOutput};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    summary = "Current user",
    description = "Returns the authenticated user and the linked Google account data.",
    responses(
        (status = 200, body = MeOutput),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<MeOutput>, ApiError> {
    let output = state.service.me(identity).await.map_err(ApiError::from)?;

    Ok(Response::OK(output))
}
