use std::time::Duration;

use crate::domain::common::{AuthConfig, CampusConfig};

#[derive(Clone)]
pub struct Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> {
    pub restaurant_repository: RE,
    pub nutrition_repository: NU,
    pub checkin_repository: CK,
    pub article_repository: AR,
    pub recommendation_repository: RC,
    pub user_repository: U,
    pub session_repository: SS,
    pub health_check_repository: HC,
    pub llm_client: LLM,
    pub places_client: PL,
    pub media_storage: MS,
    pub oauth_provider: OA,
    pub cache_store: CS,

    pub auth: AuthConfig,
    pub campus: CampusConfig,
    pub ranking_ttl: Duration,
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
    Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        restaurant_repository: RE,
        nutrition_repository: NU,
        checkin_repository: CK,
        article_repository: AR,
        recommendation_repository: RC,
        user_repository: U,
        session_repository: SS,
        health_check_repository: HC,
        llm_client: LLM,
        places_client: PL,
        media_storage: MS,
        oauth_provider: OA,
        cache_store: CS,
        auth: AuthConfig,
        campus: CampusConfig,
        ranking_ttl: Duration,
    ) -> Self {
        Self {
            restaurant_repository,
            nutrition_repository,
            checkin_repository,
            article_repository,
            recommendation_repository,
            user_repository,
            session_repository,
            health_check_repository,
            llm_client,
            places_client,
            media_storage,
            oauth_provider,
            cache_store,
            auth,
            campus,
            ranking_ttl,
        }
    }
}
