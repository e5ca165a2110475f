pub mod mappers;
pub mod repositories;

pub use repositories::recommendation_repository::PostgresRecommendationRepository;
