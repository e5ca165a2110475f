pub mod database;
pub mod live;
pub mod ready;
