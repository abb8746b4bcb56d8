//! Free-text study notes.

use super::{new_record_id, now_rfc3339, require_text, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    #[serde(default)]
    pub subject: String,
    pub title: String,
    pub content: String,
    pub is_favorite: bool,
    /// RFC 3339 creation timestamp.
    pub date_created: String,
}

impl Note {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub subject: String,
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            subject: String::new(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Builds the persisted record: fresh id, not favourite, stamped now.
    pub fn into_note(self) -> Note {
        Note {
            id: new_record_id(),
            subject: self.subject,
            title: self.title,
            content: self.content,
            is_favorite: false,
            date_created: now_rfc3339(),
        }
    }
}

/// Full-field edit of a note; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub subject: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_favorite: Option<bool>,
}

impl NotePatch {
    pub fn apply(self, note: &mut Note) {
        if let Some(subject) = self.subject {
            note.subject = subject;
        }
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(is_favorite) = self.is_favorite {
            note.is_favorite = is_favorite;
        }
    }
}
