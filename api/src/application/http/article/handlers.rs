pub mod create_article;
pub mod create_comment;
pub mod delete_article;
pub mod delete_comment;
pub mod get_article;
pub mod get_article_home;
pub mod get_articles;
pub mod update_article;
