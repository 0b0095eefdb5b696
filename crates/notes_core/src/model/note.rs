//! Note domain model.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier (SQLite rowid with AUTOINCREMENT semantics).
pub type NoteId = i64;

/// One to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Assigned on insert; strictly greater than every earlier id.
    pub id: NoteId,
    /// User-supplied text. May be empty.
    pub title: String,
    /// Persisted completion flag. Starts `false`; nothing toggles it yet.
    pub done: bool,
}

impl Note {
    pub fn new(id: NoteId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }
}
