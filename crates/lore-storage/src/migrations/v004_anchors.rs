//! v004: anchors linking learnings to file paths.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS anchors (
            id             TEXT PRIMARY KEY,
            learning_id    TEXT NOT NULL,
            file_path      TEXT NOT NULL,
            anchor_type    TEXT NOT NULL DEFAULT 'file',
            anchor_value   TEXT,
            status         TEXT NOT NULL DEFAULT 'valid',
            status_reason  TEXT,
            created_at     TEXT NOT NULL,
            verified_at    TEXT,
            FOREIGN KEY (learning_id) REFERENCES learnings(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_anchors_file ON anchors(file_path, status);
        CREATE INDEX IF NOT EXISTS idx_anchors_learning ON anchors(learning_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
