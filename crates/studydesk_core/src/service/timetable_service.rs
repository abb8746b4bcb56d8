//! Weekly timetable use-cases.

use super::collection::RecordCollection;
use super::ServiceResult;
use crate::model::timetable::{ClassDraft, ClassPatch, ClassSession, Weekday};
use crate::repo::kv_repo::KvStore;
use crate::repo::storage::Storage;
use crate::views::calendar::{classes_for_day, todays_classes};
use chrono::NaiveDate;
use log::info;

pub struct TimetableService<S: KvStore> {
    classes: RecordCollection<S, ClassSession>,
}

impl<S: KvStore> TimetableService<S> {
    pub fn open(storage: Storage<S>) -> ServiceResult<Self> {
        Ok(Self {
            classes: RecordCollection::load(storage)?,
        })
    }

    pub fn classes(&self) -> &[ClassSession] {
        self.classes.records()
    }

    pub fn get(&self, id: &str) -> Option<&ClassSession> {
        self.classes.find(id)
    }

    /// Classes on `day` ordered by start time.
    pub fn for_day(&self, day: Weekday) -> Vec<&ClassSession> {
        classes_for_day(self.classes.records(), day)
    }

    /// Classes on the weekday of `date` ordered by start time.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&ClassSession> {
        todays_classes(self.classes.records(), date)
    }

    pub fn create(&mut self, draft: ClassDraft) -> ServiceResult<ClassSession> {
        let session = draft.into_session();
        session.validate()?;
        self.classes.push(session.clone())?;
        info!(
            "event=class_create module=service status=ok id={} day={}",
            session.id, session.day
        );
        Ok(session)
    }

    pub fn update(&mut self, id: &str, patch: ClassPatch) -> ServiceResult<Option<ClassSession>> {
        let Some(mut session) = self.classes.find(id).cloned() else {
            return Ok(None);
        };
        patch.apply(&mut session);
        session.validate()?;
        self.classes.replace(session.clone())?;
        info!("event=class_update module=service status=ok id={id}");
        Ok(Some(session))
    }

    pub fn delete(&mut self, id: &str) -> ServiceResult<()> {
        if self.classes.remove(id)? {
            info!("event=class_delete module=service status=ok id={id}");
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.classes.is_dirty()
    }

    pub fn flush(&mut self) -> ServiceResult<()> {
        self.classes.flush()
    }
}
