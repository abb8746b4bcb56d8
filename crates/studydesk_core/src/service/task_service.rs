//! Task list use-cases.
//!
//! # Invariants
//! - New tasks start incomplete.
//! - Pending/completed views keep insertion order.

use super::collection::RecordCollection;
use super::ServiceResult;
use crate::model::task::{Task, TaskDraft, TaskPatch};
use crate::repo::kv_repo::KvStore;
use crate::repo::storage::Storage;
use crate::views::filters::{completed_tasks, pending_tasks};
use log::info;

pub struct TaskService<S: KvStore> {
    tasks: RecordCollection<S, Task>,
}

impl<S: KvStore> TaskService<S> {
    /// Loads the task collection from storage.
    pub fn open(storage: Storage<S>) -> ServiceResult<Self> {
        Ok(Self {
            tasks: RecordCollection::load(storage)?,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.records()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.find(id)
    }

    pub fn pending(&self) -> Vec<&Task> {
        pending_tasks(self.tasks.records())
    }

    pub fn completed(&self) -> Vec<&Task> {
        completed_tasks(self.tasks.records())
    }

    /// Validates and appends a new task.
    pub fn create(&mut self, draft: TaskDraft) -> ServiceResult<Task> {
        let task = draft.into_task();
        task.validate()?;
        self.tasks.push(task.clone())?;
        info!("event=task_create module=service status=ok id={}", task.id);
        Ok(task)
    }

    /// Applies `patch` to the task with `id`; `Ok(None)` if no such task.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> ServiceResult<Option<Task>> {
        let Some(mut task) = self.tasks.find(id).cloned() else {
            return Ok(None);
        };
        patch.apply(&mut task);
        task.validate()?;
        self.tasks.replace(task.clone())?;
        info!("event=task_update module=service status=ok id={id}");
        Ok(Some(task))
    }

    pub fn delete(&mut self, id: &str) -> ServiceResult<()> {
        if self.tasks.remove(id)? {
            info!("event=task_delete module=service status=ok id={id}");
        }
        Ok(())
    }

    /// Flips `is_completed`; returns the new value, or `None` if absent.
    pub fn toggle_completed(&mut self, id: &str) -> ServiceResult<Option<bool>> {
        let Some(mut task) = self.tasks.find(id).cloned() else {
            return Ok(None);
        };
        task.is_completed = !task.is_completed;
        let is_completed = task.is_completed;
        self.tasks.replace(task)?;
        info!("event=task_toggle module=service status=ok id={id} completed={is_completed}");
        Ok(Some(is_completed))
    }

    pub fn is_dirty(&self) -> bool {
        self.tasks.is_dirty()
    }

    /// Retries a write that previously failed.
    pub fn flush(&mut self) -> ServiceResult<()> {
        self.tasks.flush()
    }
}
