use std::time::Duration;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::{
    domain::common::{NcuFoodMapConfig, services::Service},
    infrastructure::{
        article::PostgresArticleRepository,
        authentication::{PostgresSessionRepository, PostgresUserRepository},
        cache::TtlCache,
        checkin::PostgresCheckinRepository,
        db::postgres::{Postgres, PostgresConfig},
        health::PostgresHealthCheckRepository,
        llm::TogetherLLMClient,
        media::LocalMediaStorage,
        nutrition::PostgresNutritionRepository,
        oauth::GoogleOAuthClient,
        places::GooglePlacesClient,
        recommendation::PostgresRecommendationRepository,
        restaurant::PostgresRestaurantRepository,
    },
};

pub type NcuFoodMapService = Service<
    PostgresRestaurantRepository,
    PostgresNutritionRepository,
    PostgresCheckinRepository,
    PostgresArticleRepository,
    PostgresRecommendationRepository,
    PostgresUserRepository,
    PostgresSessionRepository,
    PostgresHealthCheckRepository,
    TogetherLLMClient,
    GooglePlacesClient,
    LocalMediaStorage,
    GoogleOAuthClient,
    TtlCache,
>;

pub async fn create_service(config: NcuFoodMapConfig) -> Result<NcuFoodMapService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    Ok(build_service(postgres.get_db(), &config))
}

/// Wires every adapter around an already opened connection.
pub fn build_service(db: DatabaseConnection, config: &NcuFoodMapConfig) -> NcuFoodMapService {
    let llm_client = TogetherLLMClient::new(
        config.llm.together_api_key.clone(),
        config.llm.together_model.clone(),
        config.llm.together_base_url.clone(),
    );
    let places_client = GooglePlacesClient::new(config.google.maps_api_key.clone());
    let oauth_provider = GoogleOAuthClient::new(
        config.google.oauth_client_id.clone(),
        config.google.oauth_client_secret.clone(),
        config.google.oauth_redirect_uri.clone(),
    );
    let media_storage = LocalMediaStorage::new(
        config.media.media_root.clone(),
        config.media.public_url.clone(),
    );

    info!(
        media_root = %config.media.media_root,
        campus_radius_km = config.campus.radius_km,
        "services configured"
    );

    Service::new(
        PostgresRestaurantRepository::new(db.clone()),
        PostgresNutritionRepository::new(db.clone()),
        PostgresCheckinRepository::new(db.clone()),
        PostgresArticleRepository::new(db.clone()),
        PostgresRecommendationRepository::new(db.clone()),
        PostgresUserRepository::new(db.clone()),
        PostgresSessionRepository::new(db.clone()),
        PostgresHealthCheckRepository::new(db),
        llm_client,
        places_client,
        media_storage,
        oauth_provider,
        TtlCache::new(),
        config.auth.clone(),
        config.campus.clone(),
        Duration::from_secs(config.cache.ranking_ttl_seconds),
    )
}
