use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

pub const GOOGLE_PROVIDER: &str = "google";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        email: String,
        display_name: String,
        avatar_url: Option<String>,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            username,
            email,
            display_name,
            avatar_url,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SocialAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_uid: String,
    #[schema(value_type = Object)]
    pub extra_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user_id: Uuid, ttl_seconds: i64) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
            revoked_at: None,
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// Profile returned by the Google userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleProfile {
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub raw: serde_json::Value,
}

impl GoogleProfile {
    /// Local part of the email, used as the username on first login.
    pub fn username(&self) -> String {
        self.email
            .split('@')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.sub)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid,
    pub sid: Uuid,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Session revoked")]
    SessionRevoked,

    #[error("Invalid or expired OAuth state")]
    InvalidState,

    #[error("Authentication required")]
    MissingIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expires_after_ttl() {
        let session = Session::new(Uuid::new_v4(), 60);
        assert!(session.is_active_at(session.created_at));
        assert!(!session.is_active_at(session.created_at + Duration::seconds(61)));
    }

    #[test]
    fn revoked_session_is_inactive() {
        let mut session = Session::new(Uuid::new_v4(), 60);
        session.revoked_at = Some(session.created_at);
        assert!(!session.is_active_at(session.created_at));
    }

    #[test]
    fn username_comes_from_email_local_part() {
        let profile = GoogleProfile {
            sub: "1234".to_string(),
            email: "student@cc.ncu.edu.tw".to_string(),
            name: None,
            picture: None,
            raw: serde_json::Value::Null,
        };
        assert_eq!(profile.username(), "student");
    }
}
