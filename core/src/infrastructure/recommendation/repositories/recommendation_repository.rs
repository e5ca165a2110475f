use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        recommendation::{entities::AiRecommendation, ports::RecommendationRepository},
    },
    entity::ai_recommendations::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresRecommendationRepository {
    pub db: DatabaseConnection,
}

impl PostgresRecommendationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RecommendationRepository for PostgresRecommendationRepository {
    async fn save(&self, recommendation: AiRecommendation) -> Result<AiRecommendation, CoreError> {
        let created = Entity::insert(ActiveModel {
            id: Set(recommendation.id),
            query: Set(recommendation.query),
            store_type: Set(recommendation.store_type),
            store_name: Set(recommendation.store_name),
            address: Set(recommendation.address),
            latitude: Set(recommendation.latitude),
            longitude: Set(recommendation.longitude),
            ai_analysis: Set(recommendation.ai_analysis),
            created_at: Set(recommendation.created_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to save ai recommendation: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created.into())
    }

    async fn recent(&self, limit: u64) -> Result<Vec<AiRecommendation>, CoreError> {
        let rows = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list ai recommendations: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(rows.into_iter().map(AiRecommendation::from).collect())
    }
}
