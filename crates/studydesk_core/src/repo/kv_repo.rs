//! Flat key-value store contract and SQLite implementation.
//!
//! # Responsibility
//! - Map logical keys to opaque text values.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set_value` overwrites the whole value; there is no partial update.
//! - Reading a never-written key yields `None`, not an error.
//! - `remove_values` on SQLite removes all keys or none.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for key-value reads and writes.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("failed to encode `{key}` as JSON: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Text key-value storage.
pub trait KvStore {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_value(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove_value(&self, key: &str) -> RepoResult<()>;

    /// Removes several keys. Stores that can batch should do so atomically.
    fn remove_values(&self, keys: &[&str]) -> RepoResult<()> {
        for key in keys {
            self.remove_value(key)?;
        }
        Ok(())
    }
}

/// SQLite-backed key-value store over the `kv_entries` table.
#[derive(Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_value(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_value(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn remove_values(&self, keys: &[&str]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare("DELETE FROM kv_entries WHERE key = ?1;")?;
            for key in keys {
                stmt.execute([*key])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_value(key)
    }

    fn set_value(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set_value(key, value)
    }

    fn remove_value(&self, key: &str) -> RepoResult<()> {
        (**self).remove_value(key)
    }

    fn remove_values(&self, keys: &[&str]) -> RepoResult<()> {
        (**self).remove_values(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::{KvStore, SqliteKvStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn missing_key_reads_as_none() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKvStore::new(&conn);
        assert_eq!(store.get_value("tasks").unwrap(), None);
    }

    #[test]
    fn set_overwrites_and_remove_clears() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKvStore::new(&conn);

        store.set_value("notes", "[1]").unwrap();
        store.set_value("notes", "[2]").unwrap();
        assert_eq!(store.get_value("notes").unwrap().as_deref(), Some("[2]"));

        store.remove_value("notes").unwrap();
        assert_eq!(store.get_value("notes").unwrap(), None);
        store.remove_value("notes").unwrap();
    }

    #[test]
    fn failed_batch_removal_keeps_every_key() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKvStore::new(&conn);
        store.set_value("tasks", "[]").unwrap();
        store.set_value("notes", "[]").unwrap();
        conn.execute_batch(
            "CREATE TEMP TRIGGER keep_notes BEFORE DELETE ON kv_entries
             WHEN old.key = 'notes'
             BEGIN SELECT RAISE(ABORT, 'notes are locked'); END;",
        )
        .unwrap();

        assert!(store.remove_values(&["tasks", "notes"]).is_err());
        assert_eq!(store.get_value("tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get_value("notes").unwrap().as_deref(), Some("[]"));

        conn.execute_batch("DROP TRIGGER keep_notes;").unwrap();
        store.remove_values(&["tasks", "notes"]).unwrap();
        assert_eq!(store.get_value("tasks").unwrap(), None);
        assert_eq!(store.get_value("notes").unwrap(), None);
    }
}
