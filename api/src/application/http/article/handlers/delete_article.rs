use axum::extract::{Path, State};
use ncufoodmap_core::domain::article::ports::ArticleService;
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
pub struct DeleteArticleResponse {
    pub message: String,
    pub article_id: Uuid,
}

#[utoipa::path(
    delete,
    path = "/{article_id}",
    tag = "article",
    summary = "Delete article",
    description = "Deletes the article and its comments. Only the author may delete it.",
    params(
        ("article_id" = Uuid, Path, description = "Article ID"),
    ),
    responses(
        (status = 200, body = DeleteArticleResponse),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Article not found")
    ),
)]
pub async fn delete_article(
    Path(article_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<DeleteArticleResponse>, ApiError> {
    state
        .service
        .delete_article(identity, article_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteArticleResponse {
        message: "Article deleted".to_string(),
        article_id,
    }))
}
