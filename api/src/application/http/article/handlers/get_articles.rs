use axum::extract::State;
use ncufoodmap_core::domain::article::{
    entities::ArticleSummary, ports::ArticleService, value_objects::ArticleFilter,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    query_params::QueryParams,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetArticlesResponse {
    pub data: Vec<ArticleSummary>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "article",
    summary = "List articles",
    description = "Articles newest first, with author name and comment count.",
    params(
        ("offset" = Option<u64>, Query, description = "Articles to skip"),
        ("limit" = Option<u64>, Query, description = "Page size, 20 by default and at most 100"),
    ),
    responses(
        (status = 200, body = GetArticlesResponse)
    ),
)]
pub async fn get_articles(
    query: QueryParams,
    State(state): State<AppState>,
) -> Result<Response<GetArticlesResponse>, ApiError> {
    let pagination = query.pagination();
    let articles = state
        .service
        .list_articles(ArticleFilter {
            offset: pagination.offset,
            limit: pagination.limit,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetArticlesResponse { data: articles }))
}
