use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    article::{
        entities::{Article, ArticleSummary, Comment},
        ports::{ArticleRepository, ArticleService},
        value_objects::{
            ArticleDetail, ArticleFilter, ArticleHome, CreateArticleInput, CreateCommentInput,
            HOME_ARTICLE_COUNT, RELATED_ARTICLE_COUNT, TITLE_MAX_CHARS, UpdateArticleInput,
        },
    },
    authentication::{
        ports::{OAuthProvider, SessionRepository, UserRepository},
        value_objects::Identity,
    },
    checkin::ports::CheckinRepository,
    common::{
        entities::app_errors::CoreError, policies::ensure_owner, ports::CacheStore,
        services::Service,
    },
    health::ports::HealthCheckRepository,
    llm::ports::LLMClient,
    media::ports::MediaStorage,
    nutrition::ports::NutritionRepository,
    places::ports::PlacesClient,
    recommendation::ports::RecommendationRepository,
    restaurant::ports::RestaurantRepository,
};

fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(CoreError::Invalid(format!(
            "title must be between 1 and {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Invalid("content must not be empty".to_string()));
    }
    Ok(())
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
    Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    AR: ArticleRepository,
{
    async fn get_article_or_not_found(&self, article_id: Uuid) -> Result<Article, CoreError> {
        self.article_repository
            .get_article(article_id)
            .await?
            .ok_or(CoreError::NotFound)
    }
}

impl<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS> ArticleService
    for Service<RE, NU, CK, AR, RC, U, SS, HC, LLM, PL, MS, OA, CS>
where
    RE: RestaurantRepository,
    NU: NutritionRepository,
    CK: CheckinRepository,
    AR: ArticleRepository,
    RC: RecommendationRepository,
    U: UserRepository,
    SS: SessionRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    PL: PlacesClient,
    MS: MediaStorage,
    OA: OAuthProvider,
    CS: CacheStore,
{
    async fn article_home(&self) -> Result<ArticleHome, CoreError> {
        let latest = self
            .article_repository
            .list_articles(0, HOME_ARTICLE_COUNT)
            .await?;
        let popular = self
            .article_repository
            .most_commented(HOME_ARTICLE_COUNT)
            .await?;

        Ok(ArticleHome {
            latest,
            popular,
            total_articles: self.article_repository.count_articles().await?,
            total_comments: self.article_repository.count_comments().await?,
            total_users: self.user_repository.count_users().await?,
            total_restaurants: self.restaurant_repository.count_all().await?,
        })
    }

    async fn list_articles(&self, filter: ArticleFilter) -> Result<Vec<ArticleSummary>, CoreError> {
        self.article_repository
            .list_articles(filter.offset, filter.limit)
            .await
    }

    async fn article_detail(&self, article_id: Uuid) -> Result<ArticleDetail, CoreError> {
        let article = self.get_article_or_not_found(article_id).await?;
        let comments = self.article_repository.list_comments(article.id).await?;

        let related = match article.author_id {
            Some(author_id) => {
                self.article_repository
                    .related_articles(author_id, article.id, RELATED_ARTICLE_COUNT)
                    .await?
            }
            None => Vec::new(),
        };

        Ok(ArticleDetail {
            article,
            comments,
            related,
        })
    }

    async fn create_article(
        &self,
        identity: Identity,
        input: CreateArticleInput,
    ) -> Result<Article, CoreError> {
        validate_title(&input.title)?;
        validate_content(&input.content)?;

        let article = Article::new(&identity, input.title.trim().to_string(), input.content);
        let article = self.article_repository.create_article(article).await?;
        info!(article_id = %article.id, author = %identity.username(), "Article published");

        Ok(article)
    }

    async fn update_article(
        &self,
        identity: Identity,
        input: UpdateArticleInput,
    ) -> Result<Article, CoreError> {
        let mut article = self.get_article_or_not_found(input.article_id).await?;
        ensure_owner(&article, &identity, "only the author can edit this article")?;

        if let Some(title) = input.title {
            validate_title(&title)?;
            article.title = title.trim().to_string();
        }
        if let Some(content) = input.content {
            validate_content(&content)?;
            article.content = content;
        }
        article.updated_at = Utc::now();

        self.article_repository.update_article(article).await
    }

    async fn delete_article(&self, identity: Identity, article_id: Uuid) -> Result<(), CoreError> {
        let article = self.get_article_or_not_found(article_id).await?;
        ensure_owner(&article, &identity, "only the author can delete this article")?;

        self.article_repository.delete_article(article.id).await?;
        info!(article_id = %article_id, "Article deleted");

        Ok(())
    }

    async fn add_comment(
        &self,
        identity: Identity,
        input: CreateCommentInput,
    ) -> Result<Comment, CoreError> {
        validate_content(&input.content)?;
        let article = self.get_article_or_not_found(input.article_id).await?;

        let comment = Comment::new(article.id, &identity, input.content.trim().to_string());
        self.article_repository.create_comment(comment).await
    }

    async fn delete_comment(
        &self,
        identity: Identity,
        article_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), CoreError> {
        let comment = self
            .article_repository
            .get_comment(comment_id)
            .await?
            .filter(|comment| comment.article_id == article_id)
            .ok_or(CoreError::NotFound)?;
        ensure_owner(&comment, &identity, "only the author can delete this comment")?;

        self.article_repository.delete_comment(comment.id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        article::{
            ports::ArticleService,
            value_objects::{
                ArticleFilter, CreateArticleInput, CreateCommentInput, UpdateArticleInput,
            },
        },
        common::{entities::app_errors::CoreError, testing::TestContext},
    };

    fn article(title: &str) -> CreateArticleInput {
        CreateArticleInput {
            title: title.to_string(),
            content: "後門的炒飯份量很多".to_string(),
        }
    }

    fn comment(article_id: uuid::Uuid, content: &str) -> CreateCommentInput {
        CreateCommentInput {
            article_id,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn deleting_an_article_removes_its_comments() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let author = ctx.identity("author");
        let reader = ctx.identity("reader");

        let post = service.create_article(author.clone(), article("宵夜地圖")).await.unwrap();
        service
            .add_comment(reader.clone(), comment(post.id, "推一個"))
            .await
            .unwrap();
        service
            .add_comment(author.clone(), comment(post.id, "謝謝"))
            .await
            .unwrap();
        assert_eq!(ctx.comment_count(), 2);

        service.delete_article(author, post.id).await.unwrap();

        assert_eq!(ctx.comment_count(), 0);
        assert_eq!(
            service.article_detail(post.id).await.unwrap_err(),
            CoreError::NotFound
        );
    }

    #[tokio::test]
    async fn only_the_author_can_edit_or_delete() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let author = ctx.identity("author");
        let stranger = ctx.identity("stranger");

        let post = service.create_article(author, article("早餐推薦")).await.unwrap();

        let update = UpdateArticleInput {
            article_id: post.id,
            title: Some("改標題".to_string()),
            content: None,
        };
        assert!(matches!(
            service.update_article(stranger.clone(), update).await,
            Err(CoreError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete_article(stranger, post.id).await,
            Err(CoreError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn title_length_is_enforced() {
        let ctx = TestContext::new();
        let service = ctx.service();

        let result = service
            .create_article(ctx.identity("author"), article(&"長".repeat(201)))
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn comment_must_belong_to_the_article() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let author = ctx.identity("author");

        let first = service.create_article(author.clone(), article("一")).await.unwrap();
        let second = service.create_article(author.clone(), article("二")).await.unwrap();
        let note = service
            .add_comment(author.clone(), comment(first.id, "留言"))
            .await
            .unwrap();

        assert_eq!(
            service
                .delete_comment(author.clone(), second.id, note.id)
                .await
                .unwrap_err(),
            CoreError::NotFound
        );
        service.delete_comment(author, first.id, note.id).await.unwrap();
    }

    #[tokio::test]
    async fn detail_lists_related_articles_by_the_same_author() {
        let ctx = TestContext::new();
        let service = ctx.service();
        let author = ctx.identity("author");

        let main = service.create_article(author.clone(), article("主文")).await.unwrap();
        service.create_article(author.clone(), article("續集")).await.unwrap();
        service
            .create_article(ctx.identity("other"), article("別人的"))
            .await
            .unwrap();

        let detail = service.article_detail(main.id).await.unwrap();
        assert_eq!(detail.related.len(), 1);
        assert_eq!(detail.related[0].title, "續集");

        let all = service
            .list_articles(ArticleFilter { offset: 0, limit: 20 })
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }
}
