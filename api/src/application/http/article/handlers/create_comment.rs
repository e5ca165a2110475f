use axum::extract::{Path, State};
use ncufoodmap_core::domain::article::{
    entities::Comment, ports::ArticleService, value_objects::CreateCommentInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        article::validators::CreateCommentValidator,
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
pub struct CreateCommentResponse {
    pub data: Comment,
}

#[utoipa::path(
    post,
    path = "/{article_id}/comments",
    tag = "article",
    summary = "Add comment",
    params(
        ("article_id" = Uuid, Path, description = "Article ID"),
    ),
    responses(
        (status = 201, body = CreateCommentResponse),
        (status = 404, description = "Article not found")
    ),
    request_body = CreateCommentValidator
)]
pub async fn create_comment(
    Path(article_id): Path<Uuid>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateCommentValidator>,
) -> Result<Response<CreateCommentResponse>, ApiError> {
    let comment = state
        .service
        .add_comment(
            identity,
            CreateCommentInput {
                article_id,
                content: payload.content,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateCommentResponse { data: comment }))
}
