//! Typed JSON persistence over the five logical keys.
//!
//! # Responsibility
//! - Serialize whole collections (or the single profile) to JSON text.
//! - Decode stored text back into typed records.
//!
//! # Invariants
//! - Saves always write the full collection under its key.
//! - Undecodable stored text is logged and treated as absent: an empty
//!   collection, or no profile.

use crate::model::exam::ExamRecord;
use crate::model::note::Note;
use crate::model::profile::Profile;
use crate::model::task::Task;
use crate::model::timetable::ClassSession;
use crate::repo::kv_repo::{KvStore, RepoError, RepoResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Well-known persisted record names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Profile,
    Timetable,
    Tasks,
    Marks,
    Notes,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        Self::Profile,
        Self::Timetable,
        Self::Tasks,
        Self::Marks,
        Self::Notes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "user_profile",
            Self::Timetable => "timetable",
            Self::Tasks => "tasks",
            Self::Marks => "marks",
            Self::Notes => "notes",
        }
    }
}

/// A record type persisted as one collection under a fixed key.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KEY: StorageKey;

    fn id(&self) -> &str;
}

impl Record for ClassSession {
    const KEY: StorageKey = StorageKey::Timetable;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Task {
    const KEY: StorageKey = StorageKey::Tasks;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for ExamRecord {
    const KEY: StorageKey = StorageKey::Marks;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Note {
    const KEY: StorageKey = StorageKey::Notes;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Typed persistence facade over a [`KvStore`].
#[derive(Clone, Copy)]
pub struct Storage<S: KvStore> {
    store: S,
}

impl<S: KvStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the profile; `None` means onboarding has not happened yet.
    pub fn load_profile(&self) -> RepoResult<Option<Profile>> {
        self.load(StorageKey::Profile)
    }

    pub fn save_profile(&self, profile: &Profile) -> RepoResult<()> {
        self.save(StorageKey::Profile, profile)
    }

    /// Loads one collection; never-written keys yield an empty list.
    pub fn load_collection<T: Record>(&self) -> RepoResult<Vec<T>> {
        Ok(self.load(T::KEY)?.unwrap_or_default())
    }

    /// Overwrites one collection with `records`.
    pub fn save_collection<T: Record>(&self, records: &[T]) -> RepoResult<()> {
        self.save(T::KEY, records)
    }

    /// Removes every logical key in one batch, returning the store to
    /// first-run state. A failed clear on SQLite leaves every key in place.
    pub fn clear_all(&self) -> RepoResult<()> {
        let keys = StorageKey::ALL.map(StorageKey::as_str);
        self.store.remove_values(&keys)?;
        debug!("event=storage_clear module=repo status=ok keys={}", StorageKey::ALL.len());
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> RepoResult<Option<T>> {
        let Some(text) = self.store.get_value(key.as_str())? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(
                    "event=kv_decode module=repo status=error key={} bytes={} error={}",
                    key.as_str(),
                    text.len(),
                    err
                );
                Ok(None)
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> RepoResult<()> {
        let text = serde_json::to_string(value).map_err(|source| RepoError::Encode {
            key: key.as_str(),
            source,
        })?;
        self.store.set_value(key.as_str(), &text)?;
        debug!(
            "event=kv_write module=repo status=ok key={} bytes={}",
            key.as_str(),
            text.len()
        );
        Ok(())
    }
}
