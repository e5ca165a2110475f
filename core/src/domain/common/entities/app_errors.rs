use thiserror::Error;

use crate::domain::{
    authentication::entities::AuthError, recommendation::entities::errors::RecommendationError,
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    InternalServerError,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("File too large")]
    FileTooLarge,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error(transparent)]
    Authentication(#[from] AuthError),

    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
}
