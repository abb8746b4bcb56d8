//! Exam marks use-cases.
//!
//! # Invariants
//! - Invalid subject rows are dropped before an exam is stored.
//! - An exam with no valid subject is rejected without any write.
//! - `total_percentage`/`grade` are derived on write only.

use super::collection::RecordCollection;
use super::ServiceResult;
use crate::model::exam::{ExamDraft, ExamPatch, ExamRecord};
use crate::model::{new_record_id, ValidationError};
use crate::repo::kv_repo::KvStore;
use crate::repo::storage::Storage;
use crate::views::grading::{aggregate_subjects, chart_series, latest_exam, ChartPoint};
use log::info;

pub struct MarksService<S: KvStore> {
    exams: RecordCollection<S, ExamRecord>,
}

impl<S: KvStore> MarksService<S> {
    pub fn open(storage: Storage<S>) -> ServiceResult<Self> {
        Ok(Self {
            exams: RecordCollection::load(storage)?,
        })
    }

    /// All exams in insertion (chronological) order.
    pub fn exams(&self) -> &[ExamRecord] {
        self.exams.records()
    }

    pub fn get(&self, id: &str) -> Option<&ExamRecord> {
        self.exams.find(id)
    }

    pub fn latest(&self) -> Option<&ExamRecord> {
        latest_exam(self.exams.records())
    }

    pub fn chart(&self) -> Vec<ChartPoint> {
        chart_series(self.exams.records())
    }

    /// Aggregates valid subjects and appends the exam.
    ///
    /// # Errors
    /// - `Validation(NoValidSubjects)` when every subject row is invalid.
    pub fn create(&mut self, draft: ExamDraft) -> ServiceResult<ExamRecord> {
        let totals = aggregate_subjects(&draft.subjects).ok_or(ValidationError::NoValidSubjects)?;
        let record = ExamRecord {
            id: new_record_id(),
            exam_type: draft.exam_type,
            date: draft.date,
            subjects: totals.subjects,
            total_percentage: totals.total_percentage,
            grade: totals.grade,
        };
        self.exams.push(record.clone())?;
        info!(
            "event=exam_create module=service status=ok id={} subjects={} grade={}",
            record.id,
            record.subjects.len(),
            record.grade
        );
        Ok(record)
    }

    /// Edits an exam; replacing subjects re-derives totals and grade.
    pub fn update(&mut self, id: &str, patch: ExamPatch) -> ServiceResult<Option<ExamRecord>> {
        let Some(mut record) = self.exams.find(id).cloned() else {
            return Ok(None);
        };
        if let Some(subjects) = patch.subjects {
            let totals = aggregate_subjects(&subjects).ok_or(ValidationError::NoValidSubjects)?;
            record.subjects = totals.subjects;
            record.total_percentage = totals.total_percentage;
            record.grade = totals.grade;
        }
        if let Some(exam_type) = patch.exam_type {
            record.exam_type = exam_type;
        }
        if let Some(date) = patch.date {
            record.date = date;
        }
        self.exams.replace(record.clone())?;
        info!("event=exam_update module=service status=ok id={id}");
        Ok(Some(record))
    }

    pub fn delete(&mut self, id: &str) -> ServiceResult<()> {
        if self.exams.remove(id)? {
            info!("event=exam_delete module=service status=ok id={id}");
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.exams.is_dirty()
    }

    pub fn flush(&mut self) -> ServiceResult<()> {
        self.exams.flush()
    }
}
