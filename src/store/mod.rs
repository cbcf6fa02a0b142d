//! SQLite-backed persistence for mood entries.
//!
//! # Responsibility
//! - Open and configure the SQLite connection, applying schema migrations.
//! - Provide append/list/delete/clear over the `moods` table.
//!
//! # Invariants
//! - Entry text is validated before any SQL mutation.
//! - Entry text never appears in log output; events carry ids and counts.
//! - Storage failures are returned to the caller, never retried here.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::models::EntryValidationError;

mod entry_store;
pub mod migrations;

pub use entry_store::EntryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by every store operation.
#[derive(Debug)]
pub enum StoreError {
    Validation(EntryValidationError),
    Storage(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<EntryValidationError> for StoreError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value)
    }
}
