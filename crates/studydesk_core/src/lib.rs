//! Core domain logic for StudyDesk.
//! This crate is the single source of truth for business invariants.

pub mod advisor;
pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod views;

pub use advisor::{advisor_from_config, AdviceBoard, GeminiAdvisor, StaticAdvisor, StudyAdvisor};
pub use app::{AppPhase, AppShell};
pub use config::{AppConfig, ConfigError};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::{RecordId, ValidationError};
pub use notify::{ChimePulse, LogNotifier, Notifier, Permission, TerminalNotifier};
pub use repo::kv_repo::{KvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::storage::{Record, Storage, StorageKey};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
