use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement, Value,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        article::{
            entities::{Article, ArticleSummary, Comment, author_display_name},
            ports::ArticleRepository,
        },
        common::entities::app_errors::CoreError,
    },
    entity::{
        articles::{self, ActiveModel, Column, Entity},
        comments::{
            ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as CommentEntity,
        },
        users::Entity as UserEntity,
    },
    infrastructure::article::mappers::{article_from_parts, comment_from_parts},
};

const ARTICLE_SUMMARY_SQL: &str = r#"
    SELECT a.*,
           u.username AS author_name,
           (SELECT COUNT(*) FROM comments c WHERE c.article_id = a.id) AS comment_count
    FROM articles a
    LEFT JOIN users u ON u.id = a.author_id
"#;

#[derive(Debug, Clone)]
pub struct PostgresArticleRepository {
    pub db: DatabaseConnection,
}

impl PostgresArticleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn query_summaries(&self, sql: String, values: Vec<Value>) -> Result<Vec<ArticleSummary>, CoreError> {
        let rows = self
            .db
            .query_all(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                sql,
                values,
            ))
            .await
            .map_err(|e| {
                error!("Failed to query article summaries: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let model = articles::Model::from_query_result(row, "").ok()?;
                let author_name: Option<String> = row.try_get("", "author_name").ok()?;
                let comment_count: i64 = row.try_get("", "comment_count").ok()?;

                let mut article = article_from_parts(model, None);
                article.author_username = author_display_name(author_name);

                Some(ArticleSummary {
                    article,
                    comment_count,
                })
            })
            .collect())
    }
}

impl ArticleRepository for PostgresArticleRepository {
    async fn list_articles(&self, offset: u64, limit: u64) -> Result<Vec<ArticleSummary>, CoreError> {
        let sql = format!("{ARTICLE_SUMMARY_SQL} ORDER BY a.created_at DESC, a.id DESC LIMIT $1 OFFSET $2");

        self.query_summaries(sql, vec![(limit as i64).into(), (offset as i64).into()])
            .await
    }

    async fn most_commented(&self, limit: u64) -> Result<Vec<ArticleSummary>, CoreError> {
        let sql = format!("{ARTICLE_SUMMARY_SQL} ORDER BY comment_count DESC, a.created_at DESC LIMIT $1");

        self.query_summaries(sql, vec![(limit as i64).into()]).await
    }

    async fn get_article(&self, article_id: Uuid) -> Result<Option<Article>, CoreError> {
        let article = Entity::find_by_id(article_id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get article: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(article.map(|(model, author)| article_from_parts(model, author)))
    }

    async fn related_articles(
        &self,
        author_id: Uuid,
        exclude_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Article>, CoreError> {
        let articles = Entity::find()
            .filter(Column::AuthorId.eq(author_id))
            .filter(Column::Id.ne(exclude_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get related articles: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(articles
            .into_iter()
            .map(|(model, author)| article_from_parts(model, author))
            .collect())
    }

    async fn create_article(&self, article: Article) -> Result<Article, CoreError> {
        Entity::insert(ActiveModel::from(&article))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create article: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(article)
    }

    async fn update_article(&self, article: Article) -> Result<Article, CoreError> {
        Entity::update(ActiveModel::from(&article))
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => CoreError::NotFound,
                e => {
                    error!("Failed to update article: {}", e);
                    CoreError::InternalServerError
                }
            })?;

        Ok(article)
    }

    async fn delete_article(&self, article_id: Uuid) -> Result<(), CoreError> {
        // comments go with the article through ON DELETE CASCADE
        Entity::delete_by_id(article_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete article: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }

    async fn count_articles(&self) -> Result<u64, CoreError> {
        Entity::find().count(&self.db).await.map_err(|e| {
            error!("Failed to count articles: {}", e);
            CoreError::InternalServerError
        })
    }

    async fn count_comments(&self) -> Result<u64, CoreError> {
        CommentEntity::find().count(&self.db).await.map_err(|e| {
            error!("Failed to count comments: {}", e);
            CoreError::InternalServerError
        })
    }

    async fn list_comments(&self, article_id: Uuid) -> Result<Vec<Comment>, CoreError> {
        let comments = CommentEntity::find()
            .filter(CommentColumn::ArticleId.eq(article_id))
            .order_by_asc(CommentColumn::CreatedAt)
            .order_by_asc(CommentColumn::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list comments: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(comments
            .into_iter()
            .map(|(model, author)| comment_from_parts(model, author))
            .collect())
    }

    async fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>, CoreError> {
        let comment = CommentEntity::find_by_id(comment_id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get comment: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(comment.map(|(model, author)| comment_from_parts(model, author)))
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, CoreError> {
        CommentEntity::insert(CommentActiveModel {
            id: Set(comment.id),
            article_id: Set(comment.article_id),
            author_id: Set(comment.author_id),
            content: Set(comment.content.clone()),
            created_at: Set(comment.created_at.fixed_offset()),
            updated_at: Set(comment.updated_at.fixed_offset()),
        })
        .exec(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create comment: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), CoreError> {
        CommentEntity::delete_by_id(comment_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete comment: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(())
    }
}
