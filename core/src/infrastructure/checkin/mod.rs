pub mod mappers;
pub mod repositories;

pub use repositories::checkin_repository::PostgresCheckinRepository;
