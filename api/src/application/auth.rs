use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use ncufoodmap_core::domain::authentication::{ports::AuthService, value_objects::Identity};
use tracing::debug;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub async fn extract_token_from_bearer(parts: &mut Parts) -> Option<String> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .ok()?;

    let token = bearer.token().trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Resolves the bearer token into an [`Identity`] when one is sent.
///
/// Anonymous requests pass through; handlers that need a caller use
/// [`RequiredIdentity`]. A token that is sent but fails verification is
/// rejected here.
pub async fn auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();

    if let Some(token) = extract_token_from_bearer(&mut parts).await {
        let identity = state.service.authorize(token).await.map_err(|e| {
            debug!("Rejected bearer token: {}", e);
            ApiError::from(e)
        })?;
        parts.extensions.insert(identity);
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// The authenticated caller. Rejects with 401 when the request carries no identity.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(RequiredIdentity)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
