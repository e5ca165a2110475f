use crate::domain::{
    common::entities::app_errors::CoreError,
    recommendation::{
        entities::{AiRecommendation, Recommendation},
        value_objects::MatchOutput,
    },
};

pub trait RecommendationService: Send + Sync {
    fn recommend(
        &self,
        query: String,
    ) -> impl Future<Output = Result<Vec<Recommendation>, CoreError>> + Send;

    fn match_restaurants(
        &self,
        query: String,
    ) -> impl Future<Output = Result<MatchOutput, CoreError>> + Send;

    fn history(
        &self,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<AiRecommendation>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecommendationRepository: Send + Sync {
    fn save(
        &self,
        recommendation: AiRecommendation,
    ) -> impl Future<Output = Result<AiRecommendation, CoreError>> + Send;

    /// Newest first.
    fn recent(
        &self,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<AiRecommendation>, CoreError>> + Send;
}
