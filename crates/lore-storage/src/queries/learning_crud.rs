//! Insert, update, get, delete and lifecycle updates for learnings.

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use lore_core::constants::MAX_USAGE_BATCH_SIZE;
use lore_core::errors::{LoreError, LoreResult, ValidationError};
use lore_core::learning::{Learning, SourceType};

use super::parse_timestamp;
use crate::{malformed, to_storage_err};

const TABLE: &str = "learnings";

pub(crate) const LEARNING_COLUMNS: &str = "id, content, category, source_type, source_ref, keywords,
    usage_count, last_used_at, outcome_score, active, deleted, created_at, updated_at";

/// Insert a new learning. Fails if the id already exists.
pub fn insert_learning(conn: &Connection, learning: &Learning) -> LoreResult<()> {
    validate(learning)?;
    let keywords_json = serde_json::to_string(&learning.keywords)?;

    conn.execute(
        "INSERT INTO learnings (
            id, content, category, source_type, source_ref, keywords, usage_count,
            last_used_at, outcome_score, active, deleted, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            learning.id,
            learning.content,
            learning.category,
            learning.source_type.as_str(),
            learning.source_ref,
            keywords_json,
            learning.usage_count as i64,
            learning.last_used_at.map(|t| t.to_rfc3339()),
            learning.outcome_score,
            learning.active as i32,
            learning.deleted as i32,
            learning.created_at.to_rfc3339(),
            learning.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Get a single learning by id, soft-deleted rows included.
pub fn get_learning(conn: &Connection, id: &str) -> LoreResult<Option<Learning>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {LEARNING_COLUMNS} FROM learnings WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![id], |row| Ok(parse_learning_row(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    result.transpose()
}

/// Fetch many learnings by id. Missing ids are skipped; a malformed row fails
/// the whole batch.
pub fn get_learnings_bulk(conn: &Connection, ids: &[String]) -> LoreResult<Vec<Learning>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {LEARNING_COLUMNS} FROM learnings WHERE id IN ({placeholders})"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params_from_iter(ids.iter()), |row| Ok(parse_learning_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut found = Vec::with_capacity(ids.len());
    for row in rows {
        found.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }

    // Preserve caller order.
    let mut ordered = Vec::with_capacity(found.len());
    for id in ids {
        if let Some(pos) = found.iter().position(|l| &l.id == id) {
            ordered.push(found.swap_remove(pos));
        }
    }
    Ok(ordered)
}

/// All non-deleted learnings in insertion order.
pub fn list_learnings(conn: &Connection) -> LoreResult<Vec<Learning>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {LEARNING_COLUMNS} FROM learnings WHERE deleted = 0 ORDER BY rowid"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| Ok(parse_learning_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(results)
}

/// Overwrite every mutable column. `updated_at` is stamped by the store.
pub fn update_learning(conn: &Connection, learning: &Learning) -> LoreResult<()> {
    validate(learning)?;
    let keywords_json = serde_json::to_string(&learning.keywords)?;

    let rows = conn
        .execute(
            "UPDATE learnings SET
                content = ?2, category = ?3, source_type = ?4, source_ref = ?5,
                keywords = ?6, usage_count = MAX(usage_count, ?7), last_used_at = ?8,
                outcome_score = ?9, active = ?10, deleted = ?11, updated_at = ?12
             WHERE id = ?1",
            params![
                learning.id,
                learning.content,
                learning.category,
                learning.source_type.as_str(),
                learning.source_ref,
                keywords_json,
                learning.usage_count as i64,
                learning.last_used_at.map(|t| t.to_rfc3339()),
                learning.outcome_score,
                learning.active as i32,
                learning.deleted as i32,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(LoreError::learning_not_found(&learning.id));
    }
    Ok(())
}

/// Physically delete a learning together with every edge touching it.
/// Anchors and the embedding link cascade through foreign keys.
pub fn remove_learning(conn: &Connection, id: &str) -> LoreResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("remove_learning begin: {e}")))?;

    tx.execute(
        "DELETE FROM edges
         WHERE (source_kind = 'learning' AND source_id = ?1)
            OR (target_kind = 'learning' AND target_id = ?1)",
        params![id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = tx
        .execute("DELETE FROM learnings WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(LoreError::learning_not_found(id));
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("remove_learning commit: {e}")))?;
    Ok(())
}

/// Set the soft-delete flag.
pub fn soft_delete(conn: &Connection, id: &str) -> LoreResult<()> {
    set_flag(conn, id, "deleted", true)
}

/// Toggle the `active` flag.
pub fn set_active(conn: &Connection, id: &str, active: bool) -> LoreResult<()> {
    set_flag(conn, id, "active", active)
}

fn set_flag(conn: &Connection, id: &str, column: &str, value: bool) -> LoreResult<()> {
    let rows = conn
        .execute(
            &format!("UPDATE learnings SET {column} = ?2, updated_at = ?3 WHERE id = ?1"),
            params![id, value as i32, Utc::now().to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(LoreError::learning_not_found(id));
    }
    Ok(())
}

/// Increment `usage_count` and stamp `last_used_at` for every existing id.
/// Unknown ids are ignored. Returns the number of rows touched.
pub fn record_usage(conn: &Connection, ids: &[String], at: DateTime<Utc>) -> LoreResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }
    if ids.len() > MAX_USAGE_BATCH_SIZE {
        return Err(ValidationError::InvalidLimit { value: ids.len() }.into());
    }

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("record_usage begin: {e}")))?;
    let at = at.to_rfc3339();
    let mut touched = 0;
    {
        let mut stmt = tx
            .prepare(
                "UPDATE learnings
                 SET usage_count = usage_count + 1, last_used_at = ?2
                 WHERE id = ?1",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for id in ids {
            touched += stmt
                .execute(params![id, at])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    tx.commit()
        .map_err(|e| to_storage_err(format!("record_usage commit: {e}")))?;
    Ok(touched)
}

/// Record an observed outcome score in [0.0, 1.0].
pub fn update_outcome(conn: &Connection, id: &str, score: f64) -> LoreResult<()> {
    check_outcome(score)?;
    let rows = conn
        .execute(
            "UPDATE learnings SET outcome_score = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, score, Utc::now().to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(LoreError::learning_not_found(id));
    }
    Ok(())
}

fn validate(learning: &Learning) -> LoreResult<()> {
    if learning.id.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "id" }.into());
    }
    if learning.content.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "content" }.into());
    }
    if let Some(score) = learning.outcome_score {
        check_outcome(score)?;
    }
    Ok(())
}

fn check_outcome(score: f64) -> LoreResult<()> {
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(ValidationError::InvalidScore {
            field: "outcome_score",
            value: score,
        }
        .into());
    }
    Ok(())
}

/// Parse a row selected with [`LEARNING_COLUMNS`].
pub(crate) fn parse_learning_row(row: &Row<'_>) -> LoreResult<Learning> {
    let id: String = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;
    let source_type_str: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let keywords_json: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let usage_count: i64 = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let last_used_str: Option<String> = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let created_str: String = row.get(11).map_err(|e| to_storage_err(e.to_string()))?;
    let updated_str: String = row.get(12).map_err(|e| to_storage_err(e.to_string()))?;

    let source_type: SourceType = source_type_str
        .parse()
        .map_err(|e: String| malformed(TABLE, &id, e))?;
    let keywords: Vec<String> = serde_json::from_str(&keywords_json)
        .map_err(|e| malformed(TABLE, &id, format!("keywords is not a JSON string array: {e}")))?;
    let usage_count = u64::try_from(usage_count)
        .map_err(|_| malformed(TABLE, &id, format!("negative usage_count {usage_count}")))?;

    Ok(Learning {
        content: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        category: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        source_type,
        source_ref: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        keywords,
        usage_count,
        last_used_at: last_used_str
            .as_deref()
            .map(|s| parse_timestamp(TABLE, &id, s))
            .transpose()?,
        outcome_score: row.get(8).map_err(|e| to_storage_err(e.to_string()))?,
        active: row.get::<_, i32>(9).map_err(|e| to_storage_err(e.to_string()))? != 0,
        deleted: row.get::<_, i32>(10).map_err(|e| to_storage_err(e.to_string()))? != 0,
        created_at: parse_timestamp(TABLE, &id, &created_str)?,
        updated_at: parse_timestamp(TABLE, &id, &updated_str)?,
        id,
    })
}
