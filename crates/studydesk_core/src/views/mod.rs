//! Pure derived views over the domain model.
//!
//! # Responsibility
//! - Compute grades, exam totals, schedules, filtered lists, chart series,
//!   daily motivation and display text transforms.
//!
//! # Invariants
//! - Every function is deterministic and side-effect free.
//! - Functions are total over well-formed input; callers reject malformed
//!   drafts before calling in.

pub mod calendar;
pub mod filters;
pub mod grading;
pub mod text;
