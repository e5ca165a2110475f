use crate::{
    domain::article::entities::{Article, Comment, author_display_name},
    entity::{articles, comments, users},
};

pub fn article_from_parts(model: articles::Model, author: Option<users::Model>) -> Article {
    Article {
        id: model.id,
        title: model.title,
        content: model.content,
        author_id: model.author_id,
        author_username: author_display_name(author.map(|user| user.username)),
        created_at: model.created_at.to_utc(),
        updated_at: model.updated_at.to_utc(),
    }
}

pub fn comment_from_parts(model: comments::Model, author: Option<users::Model>) -> Comment {
    Comment {
        id: model.id,
        article_id: model.article_id,
        author_id: model.author_id,
        author_username: author_display_name(author.map(|user| user.username)),
        content: model.content,
        created_at: model.created_at.to_utc(),
        updated_at: model.updated_at.to_utc(),
    }
}

impl From<&Article> for articles::ActiveModel {
    fn from(article: &Article) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(article.id),
            title: Set(article.title.clone()),
            content: Set(article.content.clone()),
            author_id: Set(article.author_id),
            created_at: Set(article.created_at.fixed_offset()),
            updated_at: Set(article.updated_at.fixed_offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::article::entities::ANONYMOUS_AUTHOR;

    #[test]
    fn deleted_author_is_shown_as_anonymous() {
        let now = Utc::now().fixed_offset();
        let article = article_from_parts(
            articles::Model {
                id: Uuid::new_v4(),
                title: "學餐評比".to_string(),
                content: "九餐的咖哩飯值得一試".to_string(),
                author_id: None,
                created_at: now,
                updated_at: now,
            },
            None,
        );

        assert_eq!(article.author_username, ANONYMOUS_AUTHOR);
    }
}
