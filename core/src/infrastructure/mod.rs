pub mod article;
pub mod authentication;
pub mod cache;
pub mod checkin;
pub mod db;
pub mod health;
pub mod llm;
pub mod media;
pub mod nutrition;
pub mod oauth;
pub mod places;
pub mod recommendation;
pub mod restaurant;
