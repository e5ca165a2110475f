use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateArticleValidator {
    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateArticleValidator {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCommentValidator {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}
