use super::handlers::create_checkin::{__path_create_checkin, create_checkin};
use super::handlers::delete_checkin::{__path_delete_checkin, delete_checkin};
use super::handlers::get_calendar::{__path_get_calendar, get_calendar};
use super::handlers::get_checkin::{__path_get_checkin, get_checkin};
use super::handlers::get_checkins::{__path_get_checkins, get_checkins};
use super::handlers::get_map_markers::{__path_get_map_markers, get_map_markers};
use super::handlers::get_my_points::{__path_get_my_points, get_my_points};
use super::handlers::get_restaurant_ranking::{
    __path_get_restaurant_ranking, get_restaurant_ranking,
};
use super::handlers::get_user_ranking::{__path_get_user_ranking, get_user_ranking};
use super::handlers::update_checkin::{__path_update_checkin, update_checkin};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_checkins,
    create_checkin,
    get_checkin,
    update_checkin,
    delete_checkin,
    get_calendar,
    get_map_markers,
    get_my_points
))]
pub struct CheckinApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_user_ranking, get_restaurant_ranking))]
pub struct RankingApiDoc;

pub fn checkin_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{}/checkins", root_path),
            get(get_checkins).post(create_checkin),
        )
        .route(
            &format!("{}/checkins/calendar", root_path),
            get(get_calendar),
        )
        .route(&format!("{}/checkins/map", root_path), get(get_map_markers))
        .route(
            &format!("{}/checkins/points", root_path),
            get(get_my_points),
        )
        .route(
            &format!("{}/checkins/{{checkin_id}}", root_path),
            get(get_checkin).put(update_checkin).delete(delete_checkin),
        )
        .route(
            &format!("{}/rankings/users", root_path),
            get(get_user_ranking),
        )
        .route(
            &format!("{}/rankings/restaurants", root_path),
            get(get_restaurant_ranking),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
