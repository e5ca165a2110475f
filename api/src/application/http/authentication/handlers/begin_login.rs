use axum::extract::State;
use ncufoodmap_core::domain::authentication::{ports::AuthService, value_objects::AuthorizationUrl};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/google/login",
    tag = "auth",
    summary = "Start Google login",
    description = "Returns the Google authorization URL together with the one-time state the callback must echo back.",
    responses(
        (status = 200, body = AuthorizationUrl)
    ),
)]
pub async fn begin_login(
    State(state): State<AppState>,
) -> Result<Response<AuthorizationUrl>, ApiError> {
    let url = state.service.begin_login().await.map_err(ApiError::from)?;

    Ok(Response::OK(url))
}
