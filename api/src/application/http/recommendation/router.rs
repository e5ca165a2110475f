use super::handlers::get_history::{__path_get_history, get_history};
use super::handlers::match_restaurants::{__path_match_restaurants, match_restaurants};
use super::handlers::recommend::{__path_recommend, recommend};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(recommend, match_restaurants, get_history))]
pub struct RecommendationApiDoc;

pub fn recommendation_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/recommendations", root_path), post(recommend))
        .route(
            &format!("{}/recommendations/match", root_path),
            post(match_restaurants),
        )
        .route(
            &format!("{}/recommendations/history", root_path),
            get(get_history),
        )
}
