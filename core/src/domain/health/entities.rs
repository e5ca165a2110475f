use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthStatus {
    pub status: String,
    pub database: String,
    pub response_time_ms: u64,
}

impl DatabaseHealthStatus {
    pub fn up(database: String, response_time_ms: u64) -> Self {
        Self {
            status: "UP".to_string(),
            database,
            response_time_ms,
        }
    }
}
