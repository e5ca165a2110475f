pub mod article;
pub mod authentication;
pub mod checkin;
pub mod health;
pub mod media;
pub mod nutrition;
pub mod query_params;
pub mod recommendation;
pub mod restaurant;
pub mod server;
