//! Schema migrations tracked with `PRAGMA user_version`.

pub mod v001_learnings;
pub mod v002_fts5_index;
pub mod v003_edges;
pub mod v004_anchors;
pub mod v005_embeddings;

use rusqlite::Connection;

use lore_core::errors::{LoreResult, StorageError};

type Migration = fn(&Connection) -> LoreResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_learnings::migrate),
    (2, v002_fts5_index::migrate),
    (3, v003_edges::migrate),
    (4, v004_anchors::migrate),
    (5, v005_embeddings::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 5;

/// Run every migration newer than the database's recorded version.
/// Each migration and its version bump commit together.
pub fn run_migrations(conn: &Connection) -> LoreResult<()> {
    let current = current_version(conn)?;

    for (version, migrate) in MIGRATIONS {
        if current >= *version {
            continue;
        }
        let failed = |e: String| StorageError::MigrationFailed {
            version: *version,
            reason: e,
        };
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| failed(e.to_string()))?;
        migrate(&tx).map_err(|e| failed(e.to_string()))?;
        tx.pragma_update(None, "user_version", version)
            .map_err(|e| failed(e.to_string()))?;
        tx.commit().map_err(|e| failed(e.to_string()))?;
        tracing::info!(version = version, "applied migration");
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> LoreResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| {
            StorageError::SqliteError {
                message: e.to_string(),
            }
            .into()
        })
}
