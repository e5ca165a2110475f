use axum::extract::State;
use ncufoodmap_core::domain::authentication::ports::AuthService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LogoutResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    summary = "Log out",
    description = "Revokes the session behind the bearer token.",
    responses(
        (status = 200, body = LogoutResponse),
        (status = 401, description = "Not authenticated")
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<LogoutResponse>, ApiError> {
    state
        .service
        .logout(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(LogoutResponse {
        message: "Logged out".to_string(),
    }))
}
