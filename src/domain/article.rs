use crate::domain::{Author, Comment, ValidationError, timestamp};
use crate::pagination::Listed;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "idArtigo", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(rename = "titulo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "subtitulo", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(
        rename = "dataPublicacao",
        skip_deserializing,
        serialize_with = "timestamp::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_datetime: Option<NaiveDateTime>,
    #[serde(
        rename = "dataAtualizacao",
        skip_deserializing,
        serialize_with = "timestamp::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_datetime: Option<NaiveDateTime>,
    #[serde(rename = "conteudo", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "autores", default)]
    pub authors: Vec<Author>,
    #[serde(rename = "comentarios", default)]
    pub comments: Vec<Comment>,
}

impl Article {
    /// Checks an article submitted for creation. The rules run in order and
    /// the first broken one is reported. Whether the authors are registered
    /// is left to the caller, which has the storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_some() {
            return Err(ValidationError(
                "ID do artigo é gerado automaticamente, e não deve ser enviado!",
            ));
        }
        if self.title.is_none() {
            return Err(ValidationError("Título não pode ser nulo!"));
        }
        if self.subtitle.is_none() {
            return Err(ValidationError("Subtítulo não pode ser nulo!"));
        }
        if self.permalink.is_some() {
            return Err(ValidationError(
                "Permalink é gerado automaticamente, e não deve ser enviado!",
            ));
        }
        if self.authors.is_empty() {
            return Err(ValidationError("O artigo deve ter pelo menos um autor!"));
        }
        if self.authors.iter().any(|a| a.id.is_none()) {
            return Err(ValidationError("Os autores devem ter ID!"));
        }
        if self.content.is_none() {
            return Err(ValidationError("Conteúdo vazio!"));
        }
        if !self.comments.is_empty() {
            return Err(ValidationError(
                "Artigos não devem ser criados com comentários!",
            ));
        }
        Ok(())
    }

    /// Fills the text fields left out of a partial update from the stored
    /// article.
    pub fn merge(&mut self, stored: Article) {
        if self.title.is_none() {
            self.title = stored.title;
        }
        if self.subtitle.is_none() {
            self.subtitle = stored.subtitle;
        }
        if self.content.is_none() {
            self.content = stored.content;
        }
    }

    pub fn generate_permalink(&mut self) {
        self.permalink = self.title.as_deref().map(permalink_from_title);
    }

    pub fn author_ids(&self) -> Vec<i64> {
        self.authors.iter().filter_map(|a| a.id).collect()
    }
}

impl Listed for Article {
    const LIST_FIELD: &'static str = "artigos";
}

/// `"Título Artigo - Parte 1"` becomes `"titulo-artigo-parte-1"`: dashes and
/// whitespace runs collapse into single dashes, then the result is lowercased
/// and stripped of accents and anything else outside ASCII. Leading or
/// trailing whitespace leaves a dash at that end.
pub fn permalink_from_title(title: &str) -> String {
    let mut dashed = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.chars() {
        if c == '-' || is_title_space(c) {
            if !in_gap {
                dashed.push('-');
            }
            in_gap = true;
        } else {
            dashed.push(c);
            in_gap = false;
        }
    }

    dashed.to_lowercase().nfd().filter(char::is_ascii).collect()
}

// ASCII whitespace plus vertical tab; other Unicode spaces are dropped with
// the rest of the non-ASCII characters
fn is_title_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}
