pub mod get_history;
pub mod match_restaurants;
pub mod recommend;
