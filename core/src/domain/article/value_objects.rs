use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::article::entities::{Article, ArticleSummary, Comment};

pub const HOME_ARTICLE_COUNT: u64 = 5;
pub const RELATED_ARTICLE_COUNT: u64 = 5;
pub const TITLE_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArticleHome {
    pub latest: Vec<ArticleSummary>,
    pub popular: Vec<ArticleSummary>,
    pub total_articles: u64,
    pub total_comments: u64,
    pub total_users: u64,
    pub total_restaurants: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArticleDetail {
    pub article: Article,
    pub comments: Vec<Comment>,
    pub related: Vec<Article>,
}

#[derive(Debug, Clone)]
pub struct ArticleFilter {
    pub offset: u64,
    pub limit: u64,
}

pub struct CreateArticleInput {
    pub title: String,
    pub content: String,
}

pub struct UpdateArticleInput {
    pub article_id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
}

pub struct CreateCommentInput {
    pub article_id: Uuid,
    pub content: String,
}
