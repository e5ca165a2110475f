use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

pub mod errors;

/// Log row of one accepted place for one recommendation query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AiRecommendation {
    pub id: Uuid,
    pub query: String,
    pub store_type: String,
    pub store_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub ai_analysis: String,
    pub created_at: DateTime<Utc>,
}

pub struct AiRecommendationConfig {
    pub query: String,
    pub store_type: String,
    pub store_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub ai_analysis: String,
}

impl AiRecommendation {
    pub fn new(config: AiRecommendationConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            query: config.query,
            store_type: config.store_type,
            store_name: config.store_name,
            address: config.address,
            latitude: config.latitude,
            longitude: config.longitude,
            ai_analysis: config.ai_analysis,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub store_type: String,
    pub analysis: String,
    /// Kilometres from the campus centre, two decimals.
    pub distance: f64,
    pub rating: f64,
    pub photo_url: Option<String>,
    pub local_image_url: Option<String>,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchedRestaurant {
    pub id: Option<Uuid>,
    pub place_id: Option<String>,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: f64,
    pub image_url: Option<String>,
    pub from_google: bool,
}
