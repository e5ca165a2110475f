use super::handlers::create_category::{__path_create_category, create_category};
use super::handlers::create_menu_item::{__path_create_menu_item, create_menu_item};
use super::handlers::create_restaurant::{__path_create_restaurant, create_restaurant};
use super::handlers::delete_restaurant::{__path_delete_restaurant, delete_restaurant};
use super::handlers::get_categories::{__path_get_categories, get_categories};
use super::handlers::get_home::{__path_get_home, get_home};
use super::handlers::get_menu_item::{__path_get_menu_item, get_menu_item};
use super::handlers::get_restaurant::{__path_get_restaurant, get_restaurant};
use super::handlers::get_restaurants::{__path_get_restaurants, get_restaurants};
use super::handlers::search_suggestions::{__path_search_suggestions, search_suggestions};
use super::handlers::submit_review::{__path_submit_review, submit_review};
use super::handlers::update_restaurant::{__path_update_restaurant, update_restaurant};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_home,
    get_restaurants,
    get_restaurant,
    create_restaurant,
    update_restaurant,
    delete_restaurant,
    submit_review,
    create_menu_item
))]
pub struct RestaurantApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_categories, create_category))]
pub struct CategoryApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_menu_item))]
pub struct MenuItemApiDoc;

#[derive(OpenApi)]
#[openapi(paths(search_suggestions))]
pub struct SearchApiDoc;

pub fn restaurant_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/restaurants/home", root_path), get(get_home))
        .route(
            &format!("{}/restaurants", root_path),
            get(get_restaurants).post(create_restaurant),
        )
        .route(
            &format!("{}/restaurants/{{restaurant_id}}", root_path),
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
        .route(
            &format!("{}/restaurants/{{restaurant_id}}/reviews", root_path),
            post(submit_review),
        )
        .route(
            &format!("{}/restaurants/{{restaurant_id}}/menu-items", root_path),
            post(create_menu_item),
        )
        .route(
            &format!("{}/categories", root_path),
            get(get_categories).post(create_category),
        )
        .route(
            &format!("{}/menu-items/{{menu_item_id}}", root_path),
            get(get_menu_item),
        )
        .route(
            &format!("{}/search/suggestions", root_path),
            get(search_suggestions),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
