use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::domain::{
    authentication::{entities::GoogleProfile, ports::OAuthProvider},
    common::entities::app_errors::CoreError,
};

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "openid email profile";

#[derive(Debug, Clone)]
pub struct GoogleOAuthClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GoogleOAuthClient {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            client: Client::new(),
        }
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, CoreError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Google token request failed: {}", e);
                CoreError::ExternalServiceError(format!("OAuth token error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Google token endpoint error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "OAuth token endpoint returned error: {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Google token response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse token response: {}", e))
        })?;

        Ok(token.access_token)
    }
}

/// Reads the userinfo payload, keeping the raw JSON as social account data.
fn profile_from_userinfo(raw: serde_json::Value) -> Result<GoogleProfile, CoreError> {
    let field = |name: &str| raw.get(name).and_then(|v| v.as_str()).map(str::to_string);

    let sub = field("sub").ok_or_else(|| {
        CoreError::ExternalServiceError("userinfo response has no subject".to_string())
    })?;
    let email = field("email").ok_or_else(|| {
        CoreError::ExternalServiceError("userinfo response has no email".to_string())
    })?;

    Ok(GoogleProfile {
        sub,
        email,
        name: field("name"),
        picture: field("picture"),
        raw,
    })
}

impl OAuthProvider for GoogleOAuthClient {
    fn authorization_url(&self, state: String) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&prompt=select_account",
            AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(SCOPES),
            urlencoding::encode(&state)
        )
    }

    async fn exchange_code(&self, code: String) -> Result<GoogleProfile, CoreError> {
        let access_token = self.fetch_access_token(&code).await?;

        let response = self
            .client
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                error!("Google userinfo request failed: {}", e);
                CoreError::ExternalServiceError(format!("OAuth userinfo error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Google userinfo endpoint error: {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "OAuth userinfo endpoint returned error: {}",
                status
            )));
        }

        let raw: serde_json::Value = response.json().await.map_err(|e| {
            error!("Failed to parse Google userinfo: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse userinfo: {}", e))
        })?;

        profile_from_userinfo(raw)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn authorization_url_carries_state_and_scopes() {
        let client = GoogleOAuthClient::new(
            "client-1".to_string(),
            "secret".to_string(),
            "http://localhost:3333/auth/google/callback".to_string(),
        );
        let url = client.authorization_url("abc123".to_string());

        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("state=abc123"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3333%2Fauth%2Fgoogle%2Fcallback"));
    }

    #[test]
    fn userinfo_requires_subject_and_email() {
        let profile = profile_from_userinfo(json!({
            "sub": "1089",
            "email": "student@cc.ncu.edu.tw",
            "name": "中大學生",
        }))
        .unwrap();
        assert_eq!(profile.sub, "1089");
        assert_eq!(profile.picture, None);

        assert!(profile_from_userinfo(json!({ "email": "x@y.z" })).is_err());
    }
}
