use super::handlers::create_article::{__path_create_article, create_article};
use super::handlers::create_comment::{__path_create_comment, create_comment};
use super::handlers::delete_article::{__path_delete_article, delete_article};
use super::handlers::delete_comment::{__path_delete_comment, delete_comment};
use super::handlers::get_article::{__path_get_article, get_article};
use super::handlers::get_article_home::{__path_get_article_home, get_article_home};
use super::handlers::get_articles::{__path_get_articles, get_articles};
use super::handlers::update_article::{__path_update_article, update_article};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_article_home,
    get_articles,
    get_article,
    create_article,
    update_article,
    delete_article,
    create_comment,
    delete_comment
))]
pub struct ArticleApiDoc;

pub fn article_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{}/articles/home", root_path),
            get(get_article_home),
        )
        .route(
            &format!("{}/articles", root_path),
            get(get_articles).post(create_article),
        )
        .route(
            &format!("{}/articles/{{article_id}}", root_path),
            get(get_article).put(update_article).delete(delete_article),
        )
        .route(
            &format!("{}/articles/{{article_id}}/comments", root_path),
            post(create_comment),
        )
        .route(
            &format!(
                "{}/articles/{{article_id}}/comments/{{comment_id}}",
                root_path
            ),
            delete(delete_comment),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
