use crate::database::{ArticleRepository, AuthorRepository, CommentRepository};
use crate::domain::{Article, Author, Comment};
use crate::features::articles::model::DbArticle;
use crate::features::authors::model::{DbArticleAuthor, DbAuthor};
use crate::features::comments::model::DbComment;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, QueryBuilder, Sqlite};
use std::collections::HashMap;
use tracing::{debug, info};

/// Opens a pool on `database_url`, creating the database file when it does
/// not exist yet, and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<Pool<Sqlite>> {
    if !Sqlite::database_exists(database_url)
        .await
        .unwrap_or(false)
    {
        info!(database_url, "database not found, creating");
        Sqlite::create_database(database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", database_url))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", database_url))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    async fn with_relations(&self, db_article: DbArticle) -> Result<Article> {
        let article_id = db_article.id_artigo;
        debug!(article = %db_article, "loading article relations");
        let mut article: Article = db_article.into();
        article.authors = self.get_authors_by_article(article_id).await?;
        article.comments = self.get_comments_by_article(article_id).await?;
        Ok(article)
    }
}

#[async_trait]
impl AuthorRepository for SqliteRepository {
    async fn get_author(&self, id: i64) -> Result<Option<Author>> {
        let db_author = sqlx::query_as::<_, DbAuthor>("SELECT * FROM autores WHERE idAutor = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(db_author) = &db_author {
            debug!(id, author = %db_author, "found author");
        }
        Ok(db_author.map(Author::from))
    }

    async fn get_all_authors(&self) -> Result<Vec<Author>> {
        let db_authors = sqlx::query_as::<_, DbAuthor>("SELECT * FROM autores ORDER BY idAutor")
            .fetch_all(&self.pool)
            .await?;

        Ok(db_authors.into_iter().map(Author::from).collect())
    }

    async fn get_authors_by_article(&self, article_id: i64) -> Result<Vec<Author>> {
        let db_authors = sqlx::query_as::<_, DbAuthor>(
            r#"
            SELECT autores.* FROM autores
            INNER JOIN artigoAutores ON artigoAutores.idAutor = autores.idAutor
            WHERE artigoAutores.idArtigo = ?
            ORDER BY autores.idAutor
            "#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(db_authors.into_iter().map(Author::from).collect())
    }

    async fn authors_exist(&self, ids: &[i64]) -> Result<bool> {
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();
        if unique.is_empty() {
            return Ok(true);
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM autores WHERE idAutor IN (");
        {
            let mut separated = query.separated(", ");
            for id in &unique {
                separated.push_bind(*id);
            }
        }
        query.push(")");

        let found = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(found).unwrap_or(0) == unique.len())
    }

    async fn create_author(&self, author: &Author) -> Result<i64> {
        let id = sqlx::query("INSERT INTO autores (nome, sobrenome, bio) VALUES (?, ?, ?)")
            .bind(&author.first_name)
            .bind(&author.last_name)
            .bind(&author.bio)
            .execute(&self.pool)
            .await
            .context("Failed to save author")?
            .last_insert_rowid();

        info!(id, "inserted author");
        Ok(id)
    }

    async fn update_author(&self, author: &Author) -> Result<bool> {
        let Some(id) = author.id else {
            return Ok(false);
        };

        let result =
            sqlx::query("UPDATE autores SET nome = ?, sobrenome = ?, bio = ? WHERE idAutor = ?")
                .bind(&author.first_name)
                .bind(&author.last_name)
                .bind(&author.bio)
                .bind(id)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to update author {}", id))?;

        debug!(id, rows = result.rows_affected(), "updated author");
        Ok(result.rows_affected() > 0)
    }

    async fn delete_author(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM autores WHERE idAutor = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete author {}", id))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ArticleRepository for SqliteRepository {
    async fn get_article_by_id(&self, id: i64) -> Result<Option<Article>> {
        let db_article = sqlx::query_as::<_, DbArticle>("SELECT * FROM artigos WHERE idArtigo = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match db_article {
            Some(db_article) => Ok(Some(self.with_relations(db_article).await?)),
            None => Ok(None),
        }
    }

    async fn get_article_by_permalink(&self, permalink: &str) -> Result<Option<Article>> {
        let db_article =
            sqlx::query_as::<_, DbArticle>("SELECT * FROM artigos WHERE permalink = ?")
                .bind(permalink)
                .fetch_optional(&self.pool)
                .await?;

        match db_article {
            Some(db_article) => Ok(Some(self.with_relations(db_article).await?)),
            None => Ok(None),
        }
    }

    async fn get_all_articles(&self) -> Result<Vec<Article>> {
        let db_articles = sqlx::query_as::<_, DbArticle>("SELECT * FROM artigos ORDER BY idArtigo")
            .fetch_all(&self.pool)
            .await?;

        // three queries in total, then stitch the relations together in memory
        let author_rows = sqlx::query_as::<_, DbArticleAuthor>(
            r#"
            SELECT artigoAutores.idArtigo, autores.* FROM autores
            INNER JOIN artigoAutores ON artigoAutores.idAutor = autores.idAutor
            ORDER BY autores.idAutor
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let comment_rows =
            sqlx::query_as::<_, DbComment>("SELECT * FROM comentarios ORDER BY idComentario")
                .fetch_all(&self.pool)
                .await?;

        let mut authors: HashMap<i64, Vec<Author>> = HashMap::new();
        for row in author_rows {
            authors
                .entry(row.id_artigo)
                .or_default()
                .push(row.author.into());
        }

        let mut comments: HashMap<i64, Vec<Comment>> = HashMap::new();
        for row in comment_rows {
            comments.entry(row.id_artigo).or_default().push(row.into());
        }

        let articles = db_articles
            .into_iter()
            .map(|db_article| {
                let article_id = db_article.id_artigo;
                let mut article: Article = db_article.into();
                article.authors = authors.remove(&article_id).unwrap_or_default();
                article.comments = comments.remove(&article_id).unwrap_or_default();
                article
            })
            .collect();

        Ok(articles)
    }

    async fn create_article(&self, article: &Article) -> Result<i64> {
        let permalink = article.permalink.as_deref().unwrap_or_default();
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO artigos (titulo, subtitulo, conteudo, permalink, dataPublicacao)
            VALUES (?, ?, ?, ?, datetime('now','localtime'))
            "#,
        )
        .bind(&article.title)
        .bind(&article.subtitle)
        .bind(&article.content)
        .bind(permalink)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to save article {}", permalink))?
        .last_insert_rowid();

        for author_id in article.author_ids() {
            sqlx::query("INSERT OR IGNORE INTO artigoAutores (idArtigo, idAutor) VALUES (?, ?)")
                .bind(id)
                .bind(author_id)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to link author {} to article {}", author_id, id))?;
        }

        tx.commit().await?;

        info!(id, permalink, "inserted article");
        Ok(id)
    }

    async fn update_article(&self, article: &Article) -> Result<bool> {
        let Some(id) = article.id else {
            return Ok(false);
        };

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE artigos
            SET
                dataAtualizacao = datetime('now','localtime'),
                titulo = ?,
                permalink = ?,
                subtitulo = ?,
                conteudo = ?
            WHERE idArtigo = ?
            "#,
        )
        .bind(&article.title)
        .bind(&article.permalink)
        .bind(&article.subtitle)
        .bind(&article.content)
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to update article {}", id))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        if !article.authors.is_empty() {
            sqlx::query("DELETE FROM artigoAutores WHERE idArtigo = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to clear authors of article {}", id))?;

            for author_id in article.author_ids() {
                sqlx::query(
                    "INSERT OR IGNORE INTO artigoAutores (idArtigo, idAutor) VALUES (?, ?)",
                )
                .bind(id)
                .bind(author_id)
                .execute(&mut *tx)
                .await
                .with_context(|| {
                    format!("Failed to link author {} to article {}", author_id, id)
                })?;
            }
        }

        tx.commit().await?;

        info!(id, "updated article");
        Ok(true)
    }

    async fn delete_article_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM artigos WHERE idArtigo = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete article {}", id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_article_by_permalink(&self, permalink: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM artigos WHERE permalink = ?")
            .bind(permalink)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete article {}", permalink))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepository for SqliteRepository {
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
        let db_comment =
            sqlx::query_as::<_, DbComment>("SELECT * FROM comentarios WHERE idComentario = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        if let Some(db_comment) = &db_comment {
            debug!(comment = %db_comment, "found comment");
        }
        Ok(db_comment.map(Comment::from))
    }

    async fn get_all_comments(&self) -> Result<Vec<Comment>> {
        let db_comments =
            sqlx::query_as::<_, DbComment>("SELECT * FROM comentarios ORDER BY idComentario")
                .fetch_all(&self.pool)
                .await?;

        Ok(db_comments.into_iter().map(Comment::from).collect())
    }

    async fn get_comments_by_article(&self, article_id: i64) -> Result<Vec<Comment>> {
        let db_comments = sqlx::query_as::<_, DbComment>(
            "SELECT * FROM comentarios WHERE idArtigo = ? ORDER BY idComentario",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(db_comments.into_iter().map(Comment::from).collect())
    }

    async fn get_comments_by_permalink(&self, permalink: &str) -> Result<Vec<Comment>> {
        let db_comments = sqlx::query_as::<_, DbComment>(
            r#"
            SELECT comentarios.* FROM comentarios
            INNER JOIN artigos ON comentarios.idArtigo = artigos.idArtigo
            WHERE artigos.permalink = ?
            ORDER BY comentarios.idComentario
            "#,
        )
        .bind(permalink)
        .fetch_all(&self.pool)
        .await?;

        Ok(db_comments.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(&self, comment: &Comment) -> Result<i64> {
        let id = sqlx::query(
            r#"
            INSERT INTO comentarios (usuario, texto, data, idArtigo)
            VALUES (?, ?, datetime('now','localtime'), ?)
            "#,
        )
        .bind(&comment.user)
        .bind(&comment.text)
        .bind(comment.article_id)
        .execute(&self.pool)
        .await
        .context("Failed to save comment")?
        .last_insert_rowid();

        info!(id, "inserted comment");
        Ok(id)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<bool> {
        let Some(id) = comment.id else {
            return Ok(false);
        };

        let result =
            sqlx::query("UPDATE comentarios SET texto = ?, usuario = ? WHERE idComentario = ?")
                .bind(&comment.text)
                .bind(&comment.user)
                .bind(id)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to update comment {}", id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comentarios WHERE idComentario = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete comment {}", id))?;

        Ok(result.rows_affected() > 0)
    }
}
