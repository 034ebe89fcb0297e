mod article;
mod author;
mod comment;

pub use article::{Article, permalink_from_title};
pub use author::Author;
pub use comment::Comment;

use thiserror::Error;

/// A rule an incoming entity broke. The message is sent back to the client
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

// sqlite's datetime('now','localtime') format, also used on the wire.
// Dates are set by the database only, so clients never get to send one.
pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}
