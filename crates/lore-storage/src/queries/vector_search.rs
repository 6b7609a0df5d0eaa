//! Embedding storage and brute-force cosine similarity search.

use rusqlite::{params, Connection};

use lore_core::errors::{EmbeddingError, LoreResult};

use crate::to_storage_err;

/// Store an embedding for a learning, deduplicating blobs by content hash.
/// Wrapped in a SAVEPOINT so upsert and link commit together.
pub fn store_embedding(
    conn: &Connection,
    learning_id: &str,
    content_hash: &str,
    embedding: &[f32],
    model_name: &str,
) -> LoreResult<()> {
    if embedding.is_empty() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: 1,
            actual: 0,
        }
        .into());
    }

    conn.execute_batch("SAVEPOINT store_emb")
        .map_err(|e| to_storage_err(format!("store_embedding savepoint: {e}")))?;

    match store_embedding_inner(conn, learning_id, content_hash, embedding, model_name) {
        Ok(()) => {
            conn.execute_batch("RELEASE store_emb")
                .map_err(|e| to_storage_err(format!("store_embedding release: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK TO store_emb");
            let _ = conn.execute_batch("RELEASE store_emb");
            Err(e)
        }
    }
}

fn store_embedding_inner(
    conn: &Connection,
    learning_id: &str,
    content_hash: &str,
    embedding: &[f32],
    model_name: &str,
) -> LoreResult<()> {
    let blob = f32_vec_to_bytes(embedding);
    let dims = embedding.len() as i64;

    conn.execute(
        "INSERT INTO learning_embeddings (content_hash, embedding, dimensions, model_name)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(content_hash) DO UPDATE SET
            embedding = excluded.embedding,
            dimensions = excluded.dimensions,
            model_name = excluded.model_name",
        params![content_hash, blob, dims, model_name],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let embedding_id: i64 = conn
        .query_row(
            "SELECT id FROM learning_embeddings WHERE content_hash = ?1",
            params![content_hash],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO learning_embedding_link (learning_id, embedding_id)
         VALUES (?1, ?2)
         ON CONFLICT(learning_id) DO UPDATE SET embedding_id = excluded.embedding_id",
        params![learning_id, embedding_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}

/// `(learning_id, cosine similarity)` for active, non-deleted learnings,
/// most similar first. Non-positive similarities and dimension mismatches
/// are dropped.
pub fn search_vector(
    conn: &Connection,
    query_embedding: &[f32],
    limit: usize,
) -> LoreResult<Vec<(String, f64)>> {
    let query_norm_sq: f64 = query_embedding.iter().map(|x| (*x as f64) * (*x as f64)).sum();
    if query_norm_sq == 0.0 || limit == 0 {
        return Ok(vec![]);
    }

    let mut stmt = conn
        .prepare(
            "SELECT link.learning_id, emb.embedding, emb.dimensions
             FROM learning_embedding_link link
             JOIN learning_embeddings emb ON emb.id = link.embedding_id
             JOIN learnings l ON l.id = link.learning_id
             WHERE l.active = 1 AND l.deleted = 0
             ORDER BY l.rowid",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let learning_id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dimensions: i64 = row.get(2)?;
            Ok((learning_id, blob, dimensions))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let query_len = query_embedding.len();
    let mut scored: Vec<(String, f64)> = Vec::new();
    for row in rows {
        let (learning_id, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query_len {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, query_len);
        let sim = cosine_similarity(query_embedding, &stored);
        if sim > 0.0 {
            scored.push((learning_id, sim));
        }
    }

    // Stable sort keeps insertion order among equal similarities.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    Ok(scored)
}

/// Convert f32 slice to bytes (little-endian).
fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert little-endian bytes back to at most `dims` floats.
fn bytes_to_f32_vec(bytes: &[u8], dims: usize) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .take(dims)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Cosine similarity in f64. Zero when either vector has no magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
