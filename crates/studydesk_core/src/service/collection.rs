//! In-memory record collection with write-through persistence.

use super::{ServiceError, ServiceResult};
use crate::repo::kv_repo::{KvStore, RepoResult};
use crate::repo::storage::{Record, Storage};
use log::{debug, error};

pub(crate) struct RecordCollection<S: KvStore, T: Record> {
    storage: Storage<S>,
    records: Vec<T>,
    dirty: bool,
}

impl<S: KvStore, T: Record> RecordCollection<S, T> {
    pub(crate) fn load(storage: Storage<S>) -> RepoResult<Self> {
        let records = storage.load_collection::<T>()?;
        debug!(
            "event=collection_load module=service status=ok key={} count={}",
            T::KEY.as_str(),
            records.len()
        );
        Ok(Self {
            storage,
            records,
            dirty: false,
        })
    }

    pub(crate) fn records(&self) -> &[T] {
        &self.records
    }

    pub(crate) fn find(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn push(&mut self, record: T) -> ServiceResult<()> {
        self.records.push(record);
        self.persist()
    }

    /// Replaces the record with `record.id()`. Returns `false` if absent.
    pub(crate) fn replace(&mut self, record: T) -> ServiceResult<bool> {
        let Some(slot) = self
            .records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
        else {
            return Ok(false);
        };
        *slot = record;
        self.persist()?;
        Ok(true)
    }

    /// Removes the record with `id`. Unknown ids leave storage untouched.
    pub(crate) fn remove(&mut self, id: &str) -> ServiceResult<bool> {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        if self.records.len() == before {
            debug!(
                "event=collection_remove module=service status=noop key={} id={id}",
                T::KEY.as_str()
            );
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Rewrites the collection if an earlier write failed.
    pub(crate) fn flush(&mut self) -> ServiceResult<()> {
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&mut self) -> ServiceResult<()> {
        match self.storage.save_collection(&self.records) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                error!(
                    "event=collection_save module=service status=error key={} count={} error={}",
                    T::KEY.as_str(),
                    self.records.len(),
                    err
                );
                Err(ServiceError::NotSaved(err))
            }
        }
    }
}
