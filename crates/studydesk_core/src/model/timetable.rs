//! Weekly timetable entries.
//!
//! # Invariants
//! - `subject`, `start_time` and `end_time` are non-empty.
//! - Times are free-form strings; zero-padded `HH:MM` sorts correctly under
//!   lexicographic comparison. Overlaps are allowed.

use super::{new_record_id, require_text, ParseEnumError, RecordId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Class colour palette offered by the timetable editor.
pub const CLASS_PALETTE: [&str; 7] = [
    "#6366f1", // indigo
    "#ec4899", // pink
    "#f59e0b", // amber
    "#10b981", // emerald
    "#8b5cf6", // violet
    "#3b82f6", // blue
    "#ef4444", // red
];

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "10:00";

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in Monday-first order.
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Position in the Monday-first list (`Monday = 0`, `Sunday = 6`).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Weekday::index`]; wraps modulo 7.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ParseEnumError;

    /// Accepts full names or three-letter abbreviations, any case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == needle || (needle.len() == 3 && name.starts_with(&needle))
            })
            .ok_or_else(|| ParseEnumError {
                kind: "weekday",
                value: value.to_string(),
                expected: "Monday..Sunday or Mon..Sun",
            })
    }
}

/// One recurring weekly class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: RecordId,
    pub subject: String,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub color: String,
}

impl ClassSession {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("subject", &self.subject)?;
        require_text("startTime", &self.start_time)?;
        require_text("endTime", &self.end_time)?;
        Ok(())
    }
}

/// User input for a new class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDraft {
    pub subject: String,
    pub day: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub color: String,
}

impl ClassDraft {
    /// Draft with the editor defaults: `09:00`-`10:00`, first palette colour.
    pub fn new(subject: impl Into<String>, day: Weekday) -> Self {
        Self {
            subject: subject.into(),
            day,
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            room: None,
            color: CLASS_PALETTE[0].to_string(),
        }
    }

    /// Builds the persisted record with a fresh id.
    ///
    /// Blank rooms are stored as absent.
    pub fn into_session(self) -> ClassSession {
        ClassSession {
            id: new_record_id(),
            subject: self.subject,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            room: self.room.filter(|room| !room.trim().is_empty()),
            color: self.color,
        }
    }
}

/// Partial edit of an existing class; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPatch {
    pub subject: Option<String>,
    pub day: Option<Weekday>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// `Some(None)` clears the room.
    pub room: Option<Option<String>>,
    pub color: Option<String>,
}

impl ClassPatch {
    pub fn apply(self, session: &mut ClassSession) {
        if let Some(subject) = self.subject {
            session.subject = subject;
        }
        if let Some(day) = self.day {
            session.day = day;
        }
        if let Some(start_time) = self.start_time {
            session.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            session.end_time = end_time;
        }
        if let Some(room) = self.room {
            session.room = room.filter(|room| !room.trim().is_empty());
        }
        if let Some(color) = self.color {
            session.color = color;
        }
    }
}
