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
pub struct DeleteCommentResponse {
    pub message: String,
    pub comment_id: Uuid,
}

#[utoipa::path(
    delete,
    path = "/{article_id}/comments/{comment_id}",
    tag = "article",
    summary = "Delete comment",
    description = "Only the comment's author may delete it. The comment must belong to the article.",
    params(
        ("article_id" = Uuid, Path, description = "Article ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID"),
    ),
    responses(
        (status = 200, body = DeleteCommentResponse),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Comment not found on this article")
    ),
)]
pub async fn delete_comment(
    Path((article_id, comment_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<DeleteCommentResponse>, ApiError> {
    state
        .service
        .delete_comment(identity, article_id, comment_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteCommentResponse {
        message: "Comment deleted".to_string(),
        comment_id,
    }))
}
