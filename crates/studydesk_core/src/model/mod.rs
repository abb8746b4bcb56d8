//! Persisted domain model for the student workspace.
//!
//! # Responsibility
//! - Define the five persisted entities and their enumerations.
//! - Provide draft/patch inputs and field validation used by services.
//!
//! # Invariants
//! - Every collection record carries a unique opaque `id` string.
//! - Entities never reference each other by id; views are computed by
//!   filtering.
//! - Wire field names are camelCase (`isCompleted`, `dailyGoal`, ...).

pub mod exam;
pub mod note;
pub mod profile;
pub mod task;
pub mod timetable;

use chrono::{Local, SecondsFormat, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Opaque record identifier.
///
/// New records get a UUID v4 string; older stores may hold any other unique
/// string, which is kept as-is.
pub type RecordId = String;

/// Generates a fresh unique record id.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Current instant as an RFC 3339 UTC timestamp with millisecond precision.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Field-level validation failure for drafts and patches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace only.
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),
    /// Profile class level is not one of the supported levels.
    #[error("unknown class level `{0}`")]
    UnknownClassLevel(String),
    /// Daily study goal outside `1..=12` hours.
    #[error("daily goal must be between 1 and 12 hours, got {0}")]
    DailyGoalOutOfRange(u8),
    /// Exam has no subject with a name and a positive maximum.
    #[error("exam needs at least one subject with a name and a positive maximum")]
    NoValidSubjects,
}

/// Rejects empty or whitespace-only required text.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

/// Error for parsing enumerated values from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`; expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
