use crate::domain::{ValidationError, timestamp};
use crate::pagination::Listed;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "idComentario", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "idArtigo", skip_serializing_if = "Option::is_none")]
    pub article_id: Option<i64>,
    #[serde(rename = "usuario", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(rename = "texto", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        rename = "data",
        skip_deserializing,
        serialize_with = "timestamp::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_datetime: Option<NaiveDateTime>,
}

impl Comment {
    /// Checks a comment submitted for creation. Whether the article exists is
    /// left to the caller, which has the storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_some() {
            return Err(ValidationError(
                "ID do comentario é gerado automaticamente, e não deve ser enviado!",
            ));
        }
        if self.article_id.is_none() {
            return Err(ValidationError("O id do artigo não pode ser nulo!"));
        }
        if self.user.is_none() {
            return Err(ValidationError("Comentário precisa de um usuário"));
        }
        if self.text.is_none() {
            return Err(ValidationError("Comentário sem conteúdo!"));
        }
        Ok(())
    }

    pub fn merge(&mut self, stored: Comment) {
        if self.text.is_none() {
            self.text = stored.text;
        }
        if self.user.is_none() {
            self.user = stored.user;
        }
    }
}

impl Listed for Comment {
    const LIST_FIELD: &'static str = "comentarios";
}
