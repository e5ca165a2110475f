pub mod ai_recommendations;
pub mod articles;
pub mod categories;
pub mod checkins;
pub mod comments;
pub mod food_preferences;
pub mod food_records;
pub mod ingredients;
pub mod menu_item_ingredients;
pub mod menu_item_preferences;
pub mod menu_items;
pub mod nutrition_info;
pub mod restaurant_categories;
pub mod restaurants;
pub mod reviews;
pub mod sessions;
pub mod social_accounts;
pub mod users;
