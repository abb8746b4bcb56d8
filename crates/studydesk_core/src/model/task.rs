//! Homework/assignment tasks.

use super::{new_record_id, require_text, today_iso, ParseEnumError, RecordId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "priority",
                value: value.to_string(),
                expected: "Low|Medium|High",
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub subject: String,
    /// ISO date (`YYYY-MM-DD`).
    pub due_date: String,
    pub priority: Priority,
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

/// User input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub subject: String,
    pub due_date: String,
    pub priority: Priority,
    pub notes: Option<String>,
}

impl TaskDraft {
    /// Draft due today with `Medium` priority.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: String::new(),
            due_date: today_iso(),
            priority: Priority::default(),
            notes: None,
        }
    }

    /// Builds the persisted record; new tasks always start incomplete.
    pub fn into_task(self) -> Task {
        Task {
            id: new_record_id(),
            title: self.title,
            subject: self.subject,
            due_date: self.due_date,
            priority: self.priority,
            is_completed: false,
            notes: self.notes.filter(|notes| !notes.trim().is_empty()),
        }
    }
}

/// Partial edit of an existing task; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub is_completed: Option<bool>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

impl TaskPatch {
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(subject) = self.subject {
            task.subject = subject;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(is_completed) = self.is_completed {
            task.is_completed = is_completed;
        }
        if let Some(notes) = self.notes {
            task.notes = notes.filter(|notes| !notes.trim().is_empty());
        }
    }
}
