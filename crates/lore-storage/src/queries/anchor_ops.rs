//! Anchor CRUD and status transitions.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use lore_core::anchor::{Anchor, AnchorStatus, AnchorType};
use lore_core::errors::{LoreError, LoreResult, ValidationError};

use super::parse_timestamp;
use crate::{malformed, to_storage_err};

const TABLE: &str = "anchors";

const ANCHOR_COLUMNS: &str = "id, learning_id, file_path, anchor_type, anchor_value, status,
    status_reason, created_at, verified_at";

/// Insert an anchor. The learning must exist.
pub fn insert_anchor(conn: &Connection, anchor: &Anchor) -> LoreResult<()> {
    if anchor.file_path.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "file_path" }.into());
    }
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM learnings WHERE id = ?1)",
            params![anchor.learning_id],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if !exists {
        return Err(LoreError::learning_not_found(&anchor.learning_id));
    }

    conn.execute(
        "INSERT INTO anchors (
            id, learning_id, file_path, anchor_type, anchor_value, status,
            status_reason, created_at, verified_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            anchor.id,
            anchor.learning_id,
            anchor.file_path,
            anchor.anchor_type.as_str(),
            anchor.anchor_value,
            anchor.status.as_str(),
            anchor.status_reason,
            anchor.created_at.to_rfc3339(),
            anchor.verified_at.map(|t| t.to_rfc3339()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_anchor(conn: &Connection, id: &str) -> LoreResult<Option<Anchor>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {ANCHOR_COLUMNS} FROM anchors WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    stmt.query_row(params![id], |row| Ok(parse_anchor_row(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

/// Set status and reason and stamp `verified_at`.
pub fn update_anchor_status(
    conn: &Connection,
    id: &str,
    status: AnchorStatus,
    reason: Option<&str>,
) -> LoreResult<()> {
    let rows = conn
        .execute(
            "UPDATE anchors SET status = ?2, status_reason = ?3, verified_at = ?4 WHERE id = ?1",
            params![id, status.as_str(), reason, Utc::now().to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(LoreError::anchor_not_found(id));
    }
    Ok(())
}

/// Valid anchors on exactly `file_path`, oldest first.
pub fn valid_anchors_for_file(conn: &Connection, file_path: &str) -> LoreResult<Vec<Anchor>> {
    query_anchors(
        conn,
        &format!(
            "SELECT {ANCHOR_COLUMNS} FROM anchors
             WHERE file_path = ?1 AND status = 'valid' ORDER BY rowid"
        ),
        file_path,
    )
}

/// Every anchor of a learning regardless of status, oldest first.
pub fn anchors_for_learning(conn: &Connection, learning_id: &str) -> LoreResult<Vec<Anchor>> {
    query_anchors(
        conn,
        &format!("SELECT {ANCHOR_COLUMNS} FROM anchors WHERE learning_id = ?1 ORDER BY rowid"),
        learning_id,
    )
}

fn query_anchors(conn: &Connection, sql: &str, key: &str) -> LoreResult<Vec<Anchor>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![key], |row| Ok(parse_anchor_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut anchors = Vec::new();
    for row in rows {
        anchors.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(anchors)
}

fn parse_anchor_row(row: &Row<'_>) -> LoreResult<Anchor> {
    let id: String = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;
    let anchor_type_str: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let status_str: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let created_str: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let verified_str: Option<String> = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;

    let anchor_type: AnchorType = anchor_type_str
        .parse()
        .map_err(|e: String| malformed(TABLE, &id, e))?;
    let status: AnchorStatus = status_str
        .parse()
        .map_err(|e: String| malformed(TABLE, &id, e))?;

    Ok(Anchor {
        learning_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        file_path: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        anchor_type,
        anchor_value: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        status,
        status_reason: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_timestamp(TABLE, &id, &created_str)?,
        verified_at: verified_str
            .as_deref()
            .map(|s| parse_timestamp(TABLE, &id, s))
            .transpose()?,
        id,
    })
}
