use crate::{domain::recommendation::entities::AiRecommendation, entity::ai_recommendations};

impl From<ai_recommendations::Model> for AiRecommendation {
    fn from(model: ai_recommendations::Model) -> Self {
        Self {
            id: model.id,
            query: model.query,
            store_type: model.store_type,
            store_name: model.store_name,
            address: model.address,
            latitude: model.latitude,
            longitude: model.longitude,
            ai_analysis: model.ai_analysis,
            created_at: model.created_at.to_utc(),
        }
    }
}
