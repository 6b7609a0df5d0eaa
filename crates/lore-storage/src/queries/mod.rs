//! SQL for each table. Every function takes a borrowed connection so the
//! engine decides whether it runs on the writer or a pooled reader.

pub mod anchor_ops;
pub mod edge_ops;
pub mod learning_crud;
pub mod learning_search;
pub mod vector_search;

use chrono::{DateTime, Utc};

use lore_core::errors::LoreResult;

use crate::malformed;

/// Parse an RFC 3339 column value, attributing failures to the owning row.
pub(crate) fn parse_timestamp(table: &str, id: &str, value: &str) -> LoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| malformed(table, id, format!("bad timestamp '{value}': {e}")))
}
