pub mod mappers;
pub mod repositories;

pub use repositories::{
    session_repository::PostgresSessionRepository, user_repository::PostgresUserRepository,
};
