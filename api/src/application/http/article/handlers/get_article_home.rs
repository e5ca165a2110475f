use axum::extract::State;
use ncufoodmap_core::domain::article::{ports::ArticleService, value_objects::ArticleHome};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/home",
    tag = "article",
    summary = "Blog home",
    description = "Latest and most commented articles plus site totals.",
    responses(
        (status = 200, body = ArticleHome)
    ),
)]
pub async fn get_article_home(
    State(state): State<AppState>,
) -> Result<Response<ArticleHome>, ApiError> {
    let home = state.service.article_home().await.map_err(ApiError::from)?;

    Ok(Response::OK(home))
}
