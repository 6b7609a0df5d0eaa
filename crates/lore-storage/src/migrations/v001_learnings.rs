//! v001: learnings table.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS learnings (
            id             TEXT PRIMARY KEY,
            content        TEXT NOT NULL,
            category       TEXT,
            source_type    TEXT NOT NULL DEFAULT 'manual',
            source_ref     TEXT,
            keywords       TEXT NOT NULL DEFAULT '[]',
            usage_count    INTEGER NOT NULL DEFAULT 0,
            last_used_at   TEXT,
            outcome_score  REAL,
            active         INTEGER NOT NULL DEFAULT 1,
            deleted        INTEGER NOT NULL DEFAULT 0,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_learnings_category ON learnings(category);
        CREATE INDEX IF NOT EXISTS idx_learnings_live ON learnings(active, deleted);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
