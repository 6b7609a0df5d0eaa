//! v003: typed, weighted edges between `(kind, id)` nodes.
//!
//! Endpoints are polymorphic, so there is no foreign key to `learnings`;
//! removing a learning deletes its edges explicitly.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS edges (
            id           TEXT PRIMARY KEY,
            edge_type    TEXT NOT NULL,
            source_kind  TEXT NOT NULL,
            source_id    TEXT NOT NULL,
            target_kind  TEXT NOT NULL,
            target_id    TEXT NOT NULL,
            weight       REAL NOT NULL DEFAULT 1.0,
            metadata     TEXT NOT NULL DEFAULT '{}',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_edges_source ON edges(source_kind, source_id);
        CREATE INDEX IF NOT EXISTS idx_edges_target ON edges(target_kind, target_id);
        CREATE INDEX IF NOT EXISTS idx_edges_type ON edges(edge_type);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
