use crate::domain::{
    article::ports::ArticleRepository,
    authentication::ports::{OAuthProvider, SessionRepository, UserRepository},
    checkin::ports::CheckinRepository,
    common::{entities::app_errors::CoreError, ports::CacheStore, services::Service},
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    llm::ports::LLMClient,
    media::ports::MediaStorage,
    nutrition::ports::NutritionRepository,
    places::ports::PlacesClient,
    recommendation::ports::RecommendationRepository,
    restaurant::ports::RestaurantRepository,
};

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> HealthCheckService
    for Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    RE: RestaurantRepository,
    NU: NutritionRepository,
    CK: CheckinRepository,
    AR: ArticleRepository,
    RC: RecommendationRepository,
    U: UserRepository,
    SS: SessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    PL: PlacesClient,
    MS: MediaStorage,
    OA: OAuthProvider,
    CS: CacheStore,
{
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readiness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
