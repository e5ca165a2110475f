use crate::domain::{common::entities::app_errors::CoreError, llm::entities::CompletionRequest};

#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Returns the generated text, trimmed.
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
