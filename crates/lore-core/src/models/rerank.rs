use serde::{Deserialize, Serialize};

/// One reranked document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResult {
    pub document: String,
    /// Relevance in [0.0, 1.0].
    pub score: f64,
    /// Position of the document in the input slice.
    pub original_index: usize,
}
