use super::handlers::analyze_food::{__path_analyze_food, analyze_food};
use super::handlers::create_food_record::{__path_create_food_record, create_food_record};
use super::handlers::delete_food_record::{__path_delete_food_record, delete_food_record};
use super::handlers::get_allergen_info::{__path_get_allergen_info, get_allergen_info};
use super::handlers::get_dashboard::{__path_get_dashboard, get_dashboard};
use super::handlers::get_dietary_preferences::{
    __path_get_dietary_preferences, get_dietary_preferences,
};
use super::handlers::get_food_records::{__path_get_food_records, get_food_records};
use super::handlers::get_ingredient_analysis::{
    __path_get_ingredient_analysis, get_ingredient_analysis,
};
use super::handlers::nutrition_advice::{__path_nutrition_advice, nutrition_advice};
use crate::application::{auth::auth, http::server::app_state::AppState};

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_dashboard,
    get_dietary_preferences,
    get_allergen_info,
    get_ingredient_analysis,
    nutrition_advice,
    analyze_food
))]
pub struct NutritionApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_food_records, create_food_record, delete_food_record))]
pub struct FoodRecordApiDoc;

pub fn nutrition_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{}/nutrition/dashboard", root_path),
            get(get_dashboard),
        )
        .route(
            &format!("{}/nutrition/dietary-preferences", root_path),
            get(get_dietary_preferences),
        )
        .route(
            &format!("{}/nutrition/allergens", root_path),
            get(get_allergen_info),
        )
        .route(
            &format!("{}/nutrition/ingredients", root_path),
            get(get_ingredient_analysis),
        )
        .route(
            &format!("{}/nutrition/advice", root_path),
            post(nutrition_advice),
        )
        .route(
            &format!("{}/nutrition/analyze", root_path),
            post(analyze_food),
        )
        .route(
            &format!("{}/food-records", root_path),
            get(get_food_records).post(create_food_record),
        )
        .route(
            &format!("{}/food-records/{{record_id}}", root_path),
            delete(delete_food_record),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
