use axum::extract::{Path, State};
use ncufoodmap_core::domain::article::{
    entities::Article, ports::ArticleService, value_objects::UpdateArticleInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        article::validators::UpdateArticleValidator,
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
pub struct UpdateArticleResponse {
    pub data: Article,
}

#[utoipa::path(
    put,
    path = "/{article_id}",
    tag = "article",
    summary = "Update article",
    description = "Only the author may edit an article.",
    params(
        ("article_id" = Uuid, Path, description = "Article ID"),
    ),
    responses(
        (status = 200, body = UpdateArticleResponse),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Article not found")
    ),
    request_body = UpdateArticleValidator
)]
pub async fn update_article(
    Path(article_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateArticleValidator>,
) -> Result<Response<UpdateArticleResponse>, ApiError> {
    let article = state
        .service
        .update_article(
            identity,
            UpdateArticleInput {
                article_id,
                title: payload.title,
                content: payload.content,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateArticleResponse { data: article }))
}
