use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::{entities::CompletionRequest, ports::LLMClient},
};

#[derive(Debug, Clone)]
pub struct TogetherLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct TogetherRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repetition_penalty: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TogetherResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    text: String,
}

impl TogetherLLMClient {
    pub fn new(api_key: String, model_name: String, base_url: String) -> Self {
        Self {
            api_key,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

impl LLMClient for TogetherLLMClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CoreError> {
        if self.api_key.is_empty() {
            return Err(CoreError::ExternalServiceError(
                "LLM API key is not configured".to_string(),
            ));
        }

        let url = format!("{}/v1/completions", self.base_url);
        let body = TogetherRequest {
            model: &self.model_name,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            top_k: request.top_k,
            repetition_penalty: request.repetition_penalty,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Together API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Together API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let together_response: TogetherResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Together response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        together_response
            .choices
            .first()
            .map(|choice| choice.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_sampling_fields_are_omitted() {
        let body = TogetherRequest {
            model: "mistralai/Mixtral-8x7B-Instruct-v0.1",
            prompt: "hi",
            max_tokens: 800,
            temperature: 0.7,
            top_p: 0.9,
            top_k: None,
            repetition_penalty: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("top_k").is_none());
        assert!(json.get("repetition_penalty").is_none());
        assert_eq!(json["max_tokens"], 800);
    }

    #[test]
    fn response_without_choices_parses() {
        let response: TogetherResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(response.choices.is_empty());
    }
}
