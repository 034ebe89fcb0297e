use crate::domain::Comment;
use chrono::NaiveDateTime;
use derive_more::derive::Display;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{} by {}", id_comentario, usuario)]
#[sqlx(rename_all = "camelCase")]
pub struct DbComment {
    pub id_comentario: i64,
    pub id_artigo: i64,
    pub usuario: String,
    pub texto: String,
    pub data: Option<NaiveDateTime>,
}

impl From<DbComment> for Comment {
    fn from(db_comment: DbComment) -> Self {
        Comment {
            id: Some(db_comment.id_comentario),
            article_id: Some(db_comment.id_artigo),
            user: Some(db_comment.usuario),
            text: Some(db_comment.texto),
            created_datetime: db_comment.data,
        }
    }
}
