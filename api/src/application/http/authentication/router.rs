use super::handlers::begin_login::{__path_begin_login, begin_login};
use super::handlers::complete_login::{__path_complete_login, complete_login};
use super::handlers::logout::{__path_logout, logout};
use super::handlers::me::{__path_me, me};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(begin_login, complete_login, logout, me))]
pub struct AuthenticationApiDoc;

pub fn authentication_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{}/auth/google/login", root_path),
            get(begin_login),
        )
        .route(
            &format!("{}/auth/google/callback", root_path),
            get(complete_login),
        )
        .route(&format!("{}/auth/logout", root_path), post(logout))
        .route(&format!("{}/auth/me", root_path), get(me))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
