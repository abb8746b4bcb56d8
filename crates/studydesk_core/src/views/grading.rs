//! Grade bands, exam totals and the marks chart.

use crate::model::exam::{ExamRecord, Grade, SubjectMark};

/// Number of most recent exams plotted in the progress chart.
pub const CHART_WINDOW: usize = 5;

/// Maps a percentage to its grade band.
///
/// Bands are closed at the lower bound, so boundary values belong to the
/// higher grade. Out-of-range input is not clamped.
pub fn grade_for_percentage(percentage: f64) -> Grade {
    if percentage >= 90.0 {
        Grade::APlus
    } else if percentage >= 80.0 {
        Grade::A
    } else if percentage >= 70.0 {
        Grade::B
    } else if percentage >= 60.0 {
        Grade::C
    } else if percentage >= 50.0 {
        Grade::D
    } else {
        Grade::F
    }
}

/// Totals derived from the valid subjects of an exam.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamTotals {
    /// Valid subjects only, in input order.
    pub subjects: Vec<SubjectMark>,
    pub total_obtained: f64,
    pub total_max: f64,
    /// Unrounded percentage.
    pub total_percentage: f64,
    pub grade: Grade,
}

/// Drops invalid subject rows and aggregates the rest.
///
/// Returns `None` when no valid subject remains or the totals overflow;
/// such an exam must not be saved.
pub fn aggregate_subjects(candidates: &[SubjectMark]) -> Option<ExamTotals> {
    let subjects: Vec<SubjectMark> = candidates
        .iter()
        .filter(|subject| subject.is_valid())
        .cloned()
        .collect();
    if subjects.is_empty() {
        return None;
    }

    let total_obtained: f64 = subjects.iter().map(|subject| subject.obtained).sum();
    let total_max: f64 = subjects.iter().map(|subject| subject.max).sum();
    let total_percentage = total_obtained / total_max * 100.0;
    if !total_percentage.is_finite() {
        return None;
    }

    Some(ExamTotals {
        subjects,
        total_obtained,
        total_max,
        total_percentage,
        grade: grade_for_percentage(total_percentage),
    })
}

/// Rounds a stored percentage for display, halves rounding up.
pub fn display_percentage(percentage: f64) -> i64 {
    (percentage + 0.5).floor() as i64
}

/// One point of the progress chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub value: i64,
}

/// Projects the last [`CHART_WINDOW`] exams, oldest first.
pub fn chart_series(exams: &[ExamRecord]) -> Vec<ChartPoint> {
    let start = exams.len().saturating_sub(CHART_WINDOW);
    exams[start..]
        .iter()
        .map(|exam| ChartPoint {
            label: exam.exam_type.clone(),
            value: display_percentage(exam.total_percentage),
        })
        .collect()
}

/// Most recently inserted exam.
pub fn latest_exam(exams: &[ExamRecord]) -> Option<&ExamRecord> {
    exams.last()
}
