use crate::domain::Author;
use derive_more::derive::Display;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{} {}", nome, sobrenome)]
#[sqlx(rename_all = "camelCase")]
pub struct DbAuthor {
    pub id_autor: i64,
    pub nome: String,
    pub sobrenome: String,
    pub bio: Option<String>,
}

// an author row joined through artigoAutores, tagged with the article it belongs to
#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
#[sqlx(rename_all = "camelCase")]
pub struct DbArticleAuthor {
    pub id_artigo: i64,
    #[sqlx(flatten)]
    pub author: DbAuthor,
}

impl From<DbAuthor> for Author {
    fn from(db_author: DbAuthor) -> Self {
        Author {
            id: Some(db_author.id_autor),
            first_name: Some(db_author.nome),
            last_name: Some(db_author.sobrenome),
            bio: db_author.bio,
        }
    }
}
