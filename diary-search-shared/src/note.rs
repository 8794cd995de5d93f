//! Note document type.
//!
//! A note is the document record indexed into and searched from the store.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single diary note stored in the search index.
///
/// The `id` is assigned by the store when the note is indexed and is
/// back-filled on the asynchronous insert path. It is not part of the
/// serialized document body; the store keeps it as document metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned document identifier.
    #[serde(skip)]
    pub id: Option<String>,
    /// Who wrote the note.
    pub author: String,
    /// The note text.
    pub note: String,
}

impl Note {
    /// Create a new note without an identifier.
    pub fn new(author: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id: None,
            author: author.into(),
            note: note.into(),
        }
    }

    /// Create a note whose text ends with the current timestamp in
    /// milliseconds, making repeated demo runs distinguishable.
    pub fn timestamped(author: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(
            author,
            format!("{} - {}", text, Utc::now().timestamp_millis()),
        )
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "Note[{}] {}: {}", id, self.author, self.note),
            None => write!(f, "Note {}: {}", self.author, self.note),
        }
    }
}
