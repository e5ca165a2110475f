use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::{generate_timestamp, policies::Owned},
};

/// Display name used when the author account no longer exists.
pub const ANONYMOUS_AUTHOR: &str = "匿名使用者";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Option<Uuid>,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn new(author: &Identity, title: String, content: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            title,
            content,
            author_id: Some(author.id()),
            author_username: author.username().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Article {
    fn owner_id(&self) -> Option<Uuid> {
        self.author_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author_id: Option<Uuid>,
    pub author_username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(article_id: Uuid, author: &Identity, content: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            article_id,
            author_id: Some(author.id()),
            author_username: author.username().to_string(),
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Option<Uuid> {
        self.author_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArticleSummary {
    #[serde(flatten)]
    pub article: Article,
    pub comment_count: i64,
}

/// Resolves the display name of an optional author.
pub fn author_display_name(username: Option<String>) -> String {
    username
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string())
}
