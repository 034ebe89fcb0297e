use crate::domain::{Article, Author, Comment};
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// every repository is shared between request handlers, sqlx::Pool is thread safe
// write operations that target a single row report whether that row existed

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn get_author(&self, id: i64) -> Result<Option<Author>>;
    async fn get_all_authors(&self) -> Result<Vec<Author>>;
    async fn get_authors_by_article(&self, article_id: i64) -> Result<Vec<Author>>;
    async fn authors_exist(&self, ids: &[i64]) -> Result<bool>;

    // write operations
    async fn create_author(&self, author: &Author) -> Result<i64>;
    async fn update_author(&self, author: &Author) -> Result<bool>;
    async fn delete_author(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn get_article_by_id(&self, id: i64) -> Result<Option<Article>>;
    async fn get_article_by_permalink(&self, permalink: &str) -> Result<Option<Article>>;
    /// Every article with its authors and comments, in insertion order.
    async fn get_all_articles(&self) -> Result<Vec<Article>>;

    // write operations
    async fn create_article(&self, article: &Article) -> Result<i64>;
    /// Rewrites the article row; the author links are replaced only when the
    /// article carries a non-empty author list.
    async fn update_article(&self, article: &Article) -> Result<bool>;
    async fn delete_article_by_id(&self, id: i64) -> Result<bool>;
    async fn delete_article_by_permalink(&self, permalink: &str) -> Result<bool>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>>;
    async fn get_all_comments(&self) -> Result<Vec<Comment>>;
    async fn get_comments_by_article(&self, article_id: i64) -> Result<Vec<Comment>>;
    async fn get_comments_by_permalink(&self, permalink: &str) -> Result<Vec<Comment>>;

    // write operations
    async fn create_comment(&self, comment: &Comment) -> Result<i64>;
    async fn update_comment(&self, comment: &Comment) -> Result<bool>;
    async fn delete_comment(&self, id: i64) -> Result<bool>;
}

/// Everything the HTTP layer needs from storage.
pub trait BlogRepository: ArticleRepository + AuthorRepository + CommentRepository {}

impl<R> BlogRepository for R where R: ArticleRepository + AuthorRepository + CommentRepository {}
