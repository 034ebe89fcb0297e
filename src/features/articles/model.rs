use crate::domain::Article;
use chrono::NaiveDateTime;
use derive_more::derive::Display;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{}", permalink)]
#[sqlx(rename_all = "camelCase")]
pub struct DbArticle {
    pub id_artigo: i64,
    pub permalink: String,
    pub titulo: String,
    pub subtitulo: String,
    pub conteudo: String,
    pub data_publicacao: Option<NaiveDateTime>,
    pub data_atualizacao: Option<NaiveDateTime>,
}

// authors and comments are attached by the repository
impl From<DbArticle> for Article {
    fn from(db_article: DbArticle) -> Self {
        Article {
            id: Some(db_article.id_artigo),
            permalink: Some(db_article.permalink),
            title: Some(db_article.titulo),
            subtitle: Some(db_article.subtitulo),
            published_datetime: db_article.data_publicacao,
            modified_datetime: db_article.data_atualizacao,
            content: Some(db_article.conteudo),
            authors: Vec::new(),
            comments: Vec::new(),
        }
    }
}
