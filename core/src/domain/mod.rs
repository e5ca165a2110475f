pub mod article;
pub mod authentication;
pub mod checkin;
pub mod common;
pub mod health;
pub mod llm;
pub mod media;
pub mod nutrition;
pub mod places;
pub mod recommendation;
pub mod restaurant;
