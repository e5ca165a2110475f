use axum::extract::State;
use ncufoodmap_core::domain::{
    common::entities::app_errors::CoreError,
    recommendation::{entities::Recommendation, ports::RecommendationService},
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::application::http::{
    recommendation::validators::RecommendationQueryValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecommendResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendResponse {
    fn from_result(result: Result<Vec<Recommendation>, CoreError>) -> Result<Self, ApiError> {
        match result {
            Ok(recommendations) => Ok(Self {
                success: true,
                recommendations: Some(recommendations),
                error: None,
            }),
            Err(CoreError::Recommendation(e)) => {
                warn!("Recommendation failed: {}", e);
                Ok(Self {
                    success: false,
                    recommendations: None,
                    error: Some(e.to_string()),
                })
            }
            Err(e) => Err(ApiError::from(e)),
        }
    }
}

#[utoipa::path(
    post,
    path = "",
    tag = "recommendation",
    summary = "AI restaurant recommendation",
    description = "Asks the model for a store type, searches places near campus and returns up to five, nearest first. Pipeline failures are reported in the body with success set to false.",
    responses(
        (status = 200, body = RecommendResponse)
    ),
    request_body = RecommendationQueryValidator
)]
pub async fn recommend(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RecommendationQueryValidator>,
) -> Result<Response<RecommendResponse>, ApiError> {
    let result = state.service.recommend(payload.query).await;

    Ok(Response::OK(RecommendResponse::from_result(result)?))
}

#[cfg(test)]
mod tests {
    use ncufoodmap_core::domain::recommendation::entities::errors::RecommendationError;

    use super::*;

    #[test]
    fn pipeline_errors_become_an_unsuccessful_body() {
        let response = RecommendResponse::from_result(Err(CoreError::Recommendation(
            RecommendationError::EmptyQuery,
        )))
        .unwrap();

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("請輸入搜尋內容"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"success": false, "error": "請輸入搜尋內容"})
        );
    }

    #[test]
    fn other_errors_stay_http_errors() {
        assert!(RecommendResponse::from_result(Err(CoreError::InternalServerError)).is_err());
    }

    #[test]
    fn empty_success_still_lists_recommendations() {
        let response = RecommendResponse::from_result(Ok(vec![])).unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"success": true, "recommendations": []})
        );
    }
}
