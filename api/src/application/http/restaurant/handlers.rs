pub mod create_category;
pub mod create_menu_item;
pub mod create_restaurant;
pub mod delete_restaurant;
pub mod get_categories;
pub mod get_home;
pub mod get_menu_item;
pub mod get_restaurant;
pub mod get_restaurants;
pub mod search_suggestions;
pub mod submit_review;
pub mod update_restaurant;
