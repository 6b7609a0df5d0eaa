//! Edge creation and directional lookup.

use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Row};

use lore_core::errors::{LoreResult, ValidationError};
use lore_core::graph::{Direction, Edge, EdgeFilter, EdgeType, NodeKind, NodeRef};

use super::parse_timestamp;
use crate::{malformed, to_storage_err};

const TABLE: &str = "edges";

const EDGE_COLUMNS: &str =
    "id, edge_type, source_kind, source_id, target_kind, target_id, weight, metadata, created_at";

/// Insert an edge. Weights are not range-checked but must be finite.
pub fn insert_edge(conn: &Connection, edge: &Edge) -> LoreResult<()> {
    if !edge.weight.is_finite() {
        return Err(ValidationError::InvalidScore {
            field: "weight",
            value: edge.weight,
        }
        .into());
    }
    if edge.id.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "id" }.into());
    }
    let metadata_json = serde_json::to_string(&edge.metadata)?;

    conn.execute(
        "INSERT INTO edges (
            id, edge_type, source_kind, source_id, target_kind, target_id,
            weight, metadata, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            edge.id,
            edge.edge_type.as_str(),
            edge.source.kind.as_str(),
            edge.source.id,
            edge.target.kind.as_str(),
            edge.target.id,
            edge.weight,
            metadata_json,
            edge.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_edge(conn: &Connection, id: &str) -> LoreResult<Option<Edge>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {EDGE_COLUMNS} FROM edges WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    stmt.query_row(params![id], |row| Ok(parse_edge_row(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .transpose()
}

/// Edges touching `node` that pass `filter`, in insertion order.
/// For [`Direction::Both`] outbound edges come first.
pub fn edges_from(
    conn: &Connection,
    node: &NodeRef,
    direction: Direction,
    filter: &EdgeFilter,
) -> LoreResult<Vec<Edge>> {
    if filter.is_empty() {
        return Ok(Vec::new());
    }
    let mut edges = Vec::new();
    for pass in direction.passes() {
        edges.extend(edges_one_way(conn, node, *pass, filter)?);
    }
    Ok(edges)
}

fn edges_one_way(
    conn: &Connection,
    node: &NodeRef,
    direction: Direction,
    filter: &EdgeFilter,
) -> LoreResult<Vec<Edge>> {
    let anchor = match direction {
        Direction::Inbound => "target",
        _ => "source",
    };
    let mut sql = format!(
        "SELECT {EDGE_COLUMNS} FROM edges WHERE {anchor}_kind = ?1 AND {anchor}_id = ?2"
    );
    let mut values: Vec<Box<dyn ToSql>> = vec![
        Box::new(node.kind.as_str().to_string()),
        Box::new(node.id.clone()),
    ];

    if let Some(include) = &filter.include {
        sql.push_str(&format!(" AND edge_type IN ({})", placeholders(values.len(), include.len())));
        values.extend(include.iter().map(|t| Box::new(t.as_str().to_string()) as Box<dyn ToSql>));
    }
    if !filter.exclude.is_empty() {
        sql.push_str(&format!(
            " AND edge_type NOT IN ({})",
            placeholders(values.len(), filter.exclude.len())
        ));
        values.extend(
            filter
                .exclude
                .iter()
                .map(|t| Box::new(t.as_str().to_string()) as Box<dyn ToSql>),
        );
    }
    sql.push_str(" ORDER BY rowid");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt
        .query_map(refs.as_slice(), |row| Ok(parse_edge_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut edges = Vec::new();
    for row in rows {
        edges.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(edges)
}

pub fn edge_count(conn: &Connection) -> LoreResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

/// `?n, ?n+1, ...` numbered after the `already_bound` parameters.
fn placeholders(already_bound: usize, count: usize) -> String {
    (0..count)
        .map(|i| format!("?{}", already_bound + i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_edge_row(row: &Row<'_>) -> LoreResult<Edge> {
    let id: String = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;
    let edge_type_str: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let source_kind: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let target_kind: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let metadata_json: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let created_str: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;

    let edge_type: EdgeType = edge_type_str
        .parse()
        .map_err(|e: String| malformed(TABLE, &id, e))?;
    let source_kind: NodeKind = source_kind
        .parse()
        .map_err(|e: String| malformed(TABLE, &id, e))?;
    let target_kind: NodeKind = target_kind
        .parse()
        .map_err(|e: String| malformed(TABLE, &id, e))?;
    let metadata: serde_json::Value = serde_json::from_str(&metadata_json)
        .map_err(|e| malformed(TABLE, &id, format!("metadata is not JSON: {e}")))?;

    Ok(Edge {
        edge_type,
        source: NodeRef::new(
            source_kind,
            row.get::<_, String>(3).map_err(|e| to_storage_err(e.to_string()))?,
        ),
        target: NodeRef::new(
            target_kind,
            row.get::<_, String>(5).map_err(|e| to_storage_err(e.to_string()))?,
        ),
        weight: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        metadata,
        created_at: parse_timestamp(TABLE, &id, &created_str)?,
        id,
    })
}
