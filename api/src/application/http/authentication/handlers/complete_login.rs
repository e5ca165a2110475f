use axum::extract::{Query, State};
use ncufoodmap_core::domain::authentication::{
    ports::AuthService,
    value_objects::{CompleteLoginInput, LoginOutput},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    /// Authorization code issued by Google.
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by Google when the user denied access.
    pub error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/google/callback",
    tag = "auth",
    summary = "Finish Google login",
    description = "Exchanges the authorization code, creates or refreshes the user and issues a session token.",
    params(CallbackQuery),
    responses(
        (status = 200, body = LoginOutput),
        (status = 400, description = "Missing code or state"),
        (status = 401, description = "Unknown or expired state")
    ),
)]
pub async fn complete_login(
    Query(query): Query<CallbackQuery>,
    State(state): State<AppState>,
) -> Result<Response<LoginOutput>, ApiError> {
    if let Some(error) = query.error {
        return Err(ApiError::Unauthorized(format!("Google login failed: {error}")));
    }

    let (Some(code), Some(login_state)) = (query.code, query.state) else {
        return Err(ApiError::BadRequest(
            "code and state are required".to_string(),
        ));
    };

    let output = state
        .service
        .complete_login(CompleteLoginInput {
            code,
            state: login_state,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(output))
}
