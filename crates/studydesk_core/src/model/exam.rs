//! Exam results and grades.
//!
//! # Invariants
//! - A stored exam has at least one valid subject (non-empty name, `max > 0`).
//! - `total_percentage` and `grade` are derived once when the record is
//!   written and stored as-is; reads never recompute them.

use super::{today_iso, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Exam type offered by the editor before the user types one.
pub const DEFAULT_EXAM_TYPE: &str = "Unit Test";

/// Marks for one subject within an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectMark {
    pub name: String,
    pub obtained: f64,
    pub max: f64,
}

impl SubjectMark {
    pub fn new(name: impl Into<String>, obtained: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            obtained,
            max,
        }
    }

    /// Only named subjects with finite marks and a positive maximum count
    /// toward totals. Non-finite numbers cannot be stored as JSON.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.obtained.is_finite()
            && self.max.is_finite()
            && self.max > 0.0
    }
}

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: RecordId,
    /// Free-text exam type such as "Unit Test" or "Final".
    #[serde(rename = "type")]
    pub exam_type: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub subjects: Vec<SubjectMark>,
    /// Unrounded `100 * sum(obtained) / sum(max)` over valid subjects.
    pub total_percentage: f64,
    pub grade: Grade,
}

/// User input for a new exam. Invalid subject rows are dropped on save.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamDraft {
    pub exam_type: String,
    pub date: String,
    pub subjects: Vec<SubjectMark>,
}

impl ExamDraft {
    /// Draft dated today.
    pub fn new(exam_type: impl Into<String>, subjects: Vec<SubjectMark>) -> Self {
        Self {
            exam_type: exam_type.into(),
            date: today_iso(),
            subjects,
        }
    }
}

/// Partial edit of an exam; new subjects trigger re-derivation of totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamPatch {
    pub exam_type: Option<String>,
    pub date: Option<String>,
    pub subjects: Option<Vec<SubjectMark>>,
}

#[cfg(test)]
mod tests {
    use super::{Grade, SubjectMark};

    #[test]
    fn subject_validity_requires_name_and_positive_max() {
        assert!(SubjectMark::new("Maths", 45.0, 50.0).is_valid());
        assert!(!SubjectMark::new("", 45.0, 50.0).is_valid());
        assert!(!SubjectMark::new("Maths", 0.0, 0.0).is_valid());
        assert!(!SubjectMark::new("Maths", 1.0, -5.0).is_valid());
    }

    #[test]
    fn subject_validity_rejects_non_finite_marks() {
        assert!(!SubjectMark::new("Maths", f64::NAN, 50.0).is_valid());
        assert!(!SubjectMark::new("Maths", 45.0, f64::INFINITY).is_valid());
        assert!(!SubjectMark::new("Maths", f64::NEG_INFINITY, 50.0).is_valid());
    }

    #[test]
    fn grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        let decoded: Grade = serde_json::from_str("\"C\"").unwrap();
        assert_eq!(decoded, Grade::C);
    }
}
