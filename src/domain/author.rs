use crate::domain::ValidationError;
use crate::pagination::Listed;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "idAutor", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "sobrenome", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Author {
    /// Checks an author submitted for creation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_some() {
            return Err(ValidationError("Cliente nao pode passar o id!"));
        }
        if self.first_name.is_none() {
            return Err(ValidationError("Nome não pode ser nulo"));
        }
        if self.last_name.is_none() {
            return Err(ValidationError("Sobrenome não pode ser nulo"));
        }
        Ok(())
    }

    /// Fills every field left out of a partial update from the stored author.
    pub fn merge(&mut self, stored: Author) {
        if self.first_name.is_none() {
            self.first_name = stored.first_name;
        }
        if self.last_name.is_none() {
            self.last_name = stored.last_name;
        }
        if self.bio.is_none() {
            self.bio = stored.bio;
        }
    }
}

impl Listed for Author {
    const LIST_FIELD: &'static str = "autores";
}
