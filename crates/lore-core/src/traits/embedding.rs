use crate::errors::LoreResult;
use crate::models::VectorHit;

/// Turns text into vectors.
pub trait IEmbeddingModel: Send + Sync {
    fn embed(&self, text: &str) -> LoreResult<Vec<f32>>;
    fn embed_batch(&self, texts: &[String]) -> LoreResult<Vec<Vec<f32>>>;
    fn dimensions(&self) -> usize;
    fn name(&self) -> &str;
    fn is_available(&self) -> bool;
}

/// Embedding plus nearest-neighbor lookup, as consumed by hybrid search.
pub trait IEmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> LoreResult<Vec<f32>>;

    /// Nearest learnings to `vector`. Rank 1 is the nearest.
    fn nearest_neighbors(&self, vector: &[f32], limit: usize) -> LoreResult<Vec<VectorHit>>;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
