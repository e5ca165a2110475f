use uuid::Uuid;

use crate::domain::{
    article::{
        entities::{Article, ArticleSummary, Comment},
        value_objects::{
            ArticleDetail, ArticleFilter, ArticleHome, CreateArticleInput, CreateCommentInput,
            UpdateArticleInput,
        },
    },
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
};

pub trait ArticleService: Send + Sync {
    fn article_home(&self) -> impl Future<Output = Result<ArticleHome, CoreError>> + Send;

    fn list_articles(
        &self,
        filter: ArticleFilter,
    ) -> impl Future<Output = Result<Vec<ArticleSummary>, CoreError>> + Send;

    fn article_detail(
        &self,
        article_id: Uuid,
    ) -> impl Future<Output = Result<ArticleDetail, CoreError>> + Send;

    fn create_article(
        &self,
        identity: Identity,
        input: CreateArticleInput,
    ) -> impl Future<Output = Result<Article, CoreError>> + Send;

    fn update_article(
        &self,
        identity: Identity,
        input: UpdateArticleInput,
    ) -> impl Future<Output = Result<Article, CoreError>> + Send;

    fn delete_article(
        &self,
        identity: Identity,
        article_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn add_comment(
        &self,
        identity: Identity,
        input: CreateCommentInput,
    ) -> impl Future<Output = Result<Comment, CoreError>> + Send;

    fn delete_comment(
        &self,
        identity: Identity,
        article_id: Uuid,
        comment_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ArticleRepository: Send + Sync {
    /// Newest first.
    fn list_articles(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<ArticleSummary>, CoreError>> + Send;

    fn most_commented(
        &self,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<ArticleSummary>, CoreError>> + Send;

    fn get_article(
        &self,
        article_id: Uuid,
    ) -> impl Future<Output = Result<Option<Article>, CoreError>> + Send;

    fn related_articles(
        &self,
        author_id: Uuid,
        exclude_id: Uuid,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Article>, CoreError>> + Send;

    fn create_article(
        &self,
        article: Article,
    ) -> impl Future<Output = Result<Article, CoreError>> + Send;

    fn update_article(
        &self,
        article: Article,
    ) -> impl Future<Output = Result<Article, CoreError>> + Send;

    /// Removes the article together with its comments.
    fn delete_article(&self, article_id: Uuid)
    -> impl Future<Output = Result<(), CoreError>> + Send;

    fn count_articles(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn count_comments(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    /// Oldest first.
    fn list_comments(
        &self,
        article_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Comment>, CoreError>> + Send;

    fn get_comment(
        &self,
        comment_id: Uuid,
    ) -> impl Future<Output = Result<Option<Comment>, CoreError>> + Send;

    fn create_comment(
        &self,
        comment: Comment,
    ) -> impl Future<Output = Result<Comment, CoreError>> + Send;

    fn delete_comment(&self, comment_id: Uuid)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}
