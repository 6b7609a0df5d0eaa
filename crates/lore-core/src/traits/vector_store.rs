use crate::errors::LoreResult;

/// Raw embedding persistence and brute-force similarity search.
pub trait IVectorStore: Send + Sync {
    /// Stores `embedding` for `learning_id`. Identical content hashes share one blob.
    fn store_embedding(
        &self,
        learning_id: &str,
        content_hash: &str,
        embedding: &[f32],
        model_name: &str,
    ) -> LoreResult<()>;

    /// `(learning_id, cosine similarity)` pairs, most similar first.
    fn search_vector(&self, embedding: &[f32], limit: usize) -> LoreResult<Vec<(String, f64)>>;
}
