pub mod analyze_food;
pub mod create_food_record;
pub mod delete_food_record;
pub mod get_allergen_info;
pub mod get_dashboard;
pub mod get_dietary_preferences;
pub mod get_food_records;
pub mod get_ingredient_analysis;
pub mod nutrition_advice;
