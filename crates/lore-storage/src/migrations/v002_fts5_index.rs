//! v002: FTS5 virtual table on content + category + keywords, with sync triggers.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE VIRTUAL TABLE IF NOT EXISTS learning_fts USING fts5(
            content,
            category,
            keywords,
            content='learnings',
            content_rowid='rowid'
        );

        CREATE TRIGGER IF NOT EXISTS learning_fts_insert AFTER INSERT ON learnings BEGIN
            INSERT INTO learning_fts(rowid, content, category, keywords)
            VALUES (new.rowid, new.content, new.category, new.keywords);
        END;

        CREATE TRIGGER IF NOT EXISTS learning_fts_delete BEFORE DELETE ON learnings BEGIN
            INSERT INTO learning_fts(learning_fts, rowid, content, category, keywords)
            VALUES ('delete', old.rowid, old.content, old.category, old.keywords);
        END;

        CREATE TRIGGER IF NOT EXISTS learning_fts_update
        AFTER UPDATE OF content, category, keywords ON learnings BEGIN
            INSERT INTO learning_fts(learning_fts, rowid, content, category, keywords)
            VALUES ('delete', old.rowid, old.content, old.category, old.keywords);
            INSERT INTO learning_fts(rowid, content, category, keywords)
            VALUES (new.rowid, new.content, new.category, new.keywords);
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
