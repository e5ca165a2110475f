use chrono::{DateTime, Utc};
use rand::{Rng, distributions::Alphanumeric};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;

#[cfg(test)]
pub mod testing;

#[derive(Clone, Debug)]
pub struct NcuFoodMapConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub google: GoogleConfig,
    pub auth: AuthConfig,
    pub campus: CampusConfig,
    pub media: MediaConfig,
    pub cache: CacheConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub together_api_key: String,
    pub together_model: String,
    pub together_base_url: String,
}

#[derive(Clone, Debug)]
pub struct GoogleConfig {
    pub maps_api_key: String,
    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub oauth_redirect_uri: String,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_seconds: i64,
}

/// Fixed search origin used by the recommendation pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct CampusConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            latitude: 24.9684,
            longitude: 121.1955,
            radius_km: 5.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub media_root: String,
    pub public_url: String,
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub ranking_ttl_seconds: u64,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Rounds to `digits` decimal places, the way ratings and distances are displayed.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_keeps_requested_precision() {
        assert_eq!(round_to(4.26, 1), 4.3);
        assert_eq!(round_to(1.234_56, 2), 1.23);
        assert_eq!(round_to(0.0, 1), 0.0);
    }

    #[test]
    fn random_string_has_requested_length() {
        let value = generate_random_string(32);
        assert_eq!(value.len(), 32);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
