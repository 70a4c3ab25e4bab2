//! Key-value blob repository and its SQLite implementation.
//!
//! # Responsibility
//! - Load and store one text value per key in the `kv_store` table.
//!
//! # Invariants
//! - Keys are non-empty.
//! - `save_blob` is an upsert; no partial or batched writes exist.

use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key under which the planner document is stored.
pub const PLANNER_STATE_KEY: &str = "teamPlannerData";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for key-value persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Reading or writing `kv_store` failed.
    Sqlite(rusqlite::Error),
    EmptyKey,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "kv_store access failed: {err}"),
            Self::EmptyKey => write!(f, "storage key must not be empty"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::EmptyKey => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key-value store for serialized planner state.
pub trait StateRepository {
    fn load_blob(&self, key: &str) -> RepoResult<Option<String>>;
    fn save_blob(&self, key: &str, value: &str) -> RepoResult<()>;
    fn delete_blob(&self, key: &str) -> RepoResult<bool>;
}

/// SQLite-backed key-value repository.
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn load_blob(&self, key: &str) -> RepoResult<Option<String>> {
        ensure_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save_blob(&self, key: &str, value: &str) -> RepoResult<()> {
        ensure_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_blob(&self, key: &str) -> RepoResult<bool> {
        ensure_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

impl<R: StateRepository + ?Sized> StateRepository for &R {
    fn load_blob(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).load_blob(key)
    }

    fn save_blob(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).save_blob(key, value)
    }

    fn delete_blob(&self, key: &str) -> RepoResult<bool> {
        (**self).delete_blob(key)
    }
}

fn ensure_key(key: &str) -> RepoResult<()> {
    if key.trim().is_empty() {
        return Err(RepoError::EmptyKey);
    }
    Ok(())
}
