//! # lore-storage
//!
//! SQLite persistence for the Lore retrieval engine. One serialized write
//! connection plus a round-robin read pool, ordered migrations, an FTS5 index
//! kept in sync by triggers, and content-hash-deduplicated embedding blobs.
//!
//! [`StorageEngine`] implements every store trait from `lore-core`.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use lore_core::errors::{LoreError, StorageError};

/// Wrap a SQLite failure message into a [`LoreError`].
pub(crate) fn to_storage_err(message: String) -> LoreError {
    LoreError::StorageError(StorageError::SqliteError { message })
}

/// A row that exists but cannot be turned back into its domain type.
pub(crate) fn malformed(table: &str, id: &str, reason: impl Into<String>) -> LoreError {
    LoreError::StorageError(StorageError::MalformedRecord {
        table: table.to_string(),
        id: id.to_string(),
        reason: reason.into(),
    })
}
