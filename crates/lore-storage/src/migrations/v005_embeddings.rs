//! v005: embedding blobs deduplicated by content hash, plus the learning link.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS learning_embeddings (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            content_hash  TEXT NOT NULL UNIQUE,
            embedding     BLOB NOT NULL,
            dimensions    INTEGER NOT NULL,
            model_name    TEXT NOT NULL DEFAULT 'unknown',
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS learning_embedding_link (
            learning_id   TEXT NOT NULL,
            embedding_id  INTEGER NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (learning_id),
            FOREIGN KEY (learning_id) REFERENCES learnings(id) ON DELETE CASCADE,
            FOREIGN KEY (embedding_id) REFERENCES learning_embeddings(id) ON DELETE CASCADE
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
