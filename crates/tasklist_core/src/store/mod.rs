//! Key-value slot persistence.
//!
//! # Responsibility
//! - Define the local key-value contract the list is persisted into.
//! - Encode/decode the full item collection into one named slot.
//!
//! # Invariants
//! - A slot write replaces the whole value in one statement.
//! - Loading never fails the caller: absent or corrupt slots read as empty.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod item_store;
pub mod kv;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for slot reads and writes.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode item list: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
