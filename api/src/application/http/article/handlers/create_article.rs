use axum::extract::State;
use ncufoodmap_core::domain::article::{
    entities::Article, ports::ArticleService, value_objects::CreateArticleInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        article::validators::CreateArticleValidator,
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
pub struct CreateArticleResponse {
    pub data: Article,
}

#[utoipa::path(
    post,
    path = "",
    tag = "article",
    summary = "Create article",
    responses(
        (status = 201, body = CreateArticleResponse),
        (status = 401, description = "Not authenticated")
    ),
    request_body = CreateArticleValidator
)]
pub async fn create_article(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateArticleValidator>,
) -> Result<Response<CreateArticleResponse>, ApiError> {
    let article = state
        .service
        .create_article(
            identity,
            CreateArticleInput {
                title: payload.title,
                content: payload.content,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateArticleResponse { data: article }))
}
