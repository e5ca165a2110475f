use axum::extract::{Path, State};
use ncufoodmap_core::domain::article::{ports::ArticleService, value_objects::ArticleDetail};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{article_id}",
    tag = "article",
    summary = "Get article",
    description = "Article with its comments, oldest first, and other articles by the same author.",
    params(
        ("article_id" = Uuid, Path, description = "Article ID"),
    ),
    responses(
        (status = 200, body = ArticleDetail),
        (status = 404, description = "Article not found")
    ),
)]
pub async fn get_article(
    Path(article_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<ArticleDetail>, ApiError> {
    let detail = state
        .service
        .article_detail(article_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(detail))
}
