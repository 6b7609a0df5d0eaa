//! FTS5 full-text search with BM25 ranking.

use std::sync::LazyLock;

use regex::Regex;
use rusqlite::{params, Connection};

use lore_core::errors::LoreResult;
use lore_core::models::LexicalHit;

use crate::to_storage_err;

/// Words: runs of letters, digits and underscores.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").unwrap());

/// Turn free text into an FTS5 MATCH expression: every word becomes a quoted
/// term and terms are OR-ed, so punctuation and FTS operators in user input
/// are never interpreted. Returns `None` when no word survives.
pub fn to_match_expression(query: &str) -> Option<String> {
    let terms: Vec<String> = TOKEN_RE
        .find_iter(query)
        .map(|m| format!("\"{}\"", m.as_str()))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

/// BM25 search over active, non-deleted learnings. Rank 1 is the best hit.
pub fn lexical_search(conn: &Connection, query: &str, limit: usize) -> LoreResult<Vec<LexicalHit>> {
    let Some(expression) = to_match_expression(query) else {
        return Ok(Vec::new());
    };
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut stmt = conn
        .prepare(
            "SELECT l.id, bm25(learning_fts) AS score
             FROM learning_fts
             JOIN learnings l ON l.rowid = learning_fts.rowid
             WHERE learning_fts MATCH ?1 AND l.active = 1 AND l.deleted = 0
             ORDER BY score, l.rowid
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![expression, limit as i64], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut hits = Vec::new();
    for (i, row) in rows.enumerate() {
        let (id, bm25) = row.map_err(|e| to_storage_err(e.to_string()))?;
        hits.push(LexicalHit {
            id,
            rank: i + 1,
            bm25,
        });
    }
    Ok(hits)
}
