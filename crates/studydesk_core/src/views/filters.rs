//! Task and note list filters.

use crate::model::note::Note;
use crate::model::task::Task;

/// Tasks not yet completed, in insertion order.
pub fn pending_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| !task.is_completed).collect()
}

/// Completed tasks, in insertion order.
pub fn completed_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_completed).collect()
}

/// Note list filter: search term AND optional favourites-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring of title or content. Empty matches all.
    pub term: String,
    pub favorites_only: bool,
}

impl NoteFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            favorites_only: false,
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        if self.favorites_only && !note.is_favorite {
            return false;
        }
        let term = self.term.to_lowercase();
        note.title.to_lowercase().contains(&term) || note.content.to_lowercase().contains(&term)
    }
}

pub fn search_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    notes.iter().filter(|note| filter.matches(note)).collect()
}
