pub mod mappers;
pub mod repositories;

pub use repositories::restaurant_repository::PostgresRestaurantRepository;
