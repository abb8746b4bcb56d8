//! Feature services (one per screen of the app).
//!
//! # Responsibility
//! - Own one in-memory entity collection each, loaded from storage on open.
//! - Validate drafts, mutate in memory, then persist the whole collection.
//!
//! # Invariants
//! - Validation failures leave both memory and storage untouched.
//! - A failed write keeps the in-memory change, marks the service dirty and
//!   reports `ServiceError::NotSaved`; `flush()` retries.
//! - Update/delete/toggle of an unknown id is a silent no-op.

pub mod dashboard;
pub mod marks_service;
pub mod note_service;
pub mod onboarding_service;
pub mod settings_service;
pub mod task_service;
pub mod timetable_service;

mod collection;

use crate::model::ValidationError;
use crate::repo::kv_repo::RepoError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The change is applied in memory but could not be written.
    #[error("change kept in memory but not saved: {0}")]
    NotSaved(#[source] RepoError),
    /// Reading from storage failed.
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
