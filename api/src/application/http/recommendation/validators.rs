use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Free-text query. Blank queries are answered inside the response body.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecommendationQueryValidator {
    #[serde(default)]
    #[validate(length(max = 500, message = "query is too long"))]
    pub query: String,
}
