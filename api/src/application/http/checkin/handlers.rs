pub mod create_checkin;
pub mod delete_checkin;
pub mod get_calendar;
pub mod get_checkin;
pub mod get_checkins;
pub mod get_map_markers;
pub mod get_my_points;
pub mod get_restaurant_ranking;
pub mod get_user_ranking;
pub mod update_checkin;
