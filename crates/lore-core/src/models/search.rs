use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::learning::Learning;

/// One hit from the lexical (BM25) index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalHit {
    pub id: String,
    /// 1-indexed position; 1 is the best match.
    pub rank: usize,
    /// Raw FTS5 bm25 value (more negative = more relevant).
    pub bm25: f64,
}

/// One hit from nearest-neighbor search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    /// 1-indexed position; 1 is the nearest neighbor.
    pub rank: usize,
    /// Cosine similarity.
    pub score: f64,
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchResult {
    pub id: String,
    pub content: String,
    pub category: Option<String>,
    /// Final composite score used for ordering.
    pub relevance_score: f64,
    pub rrf_score: f64,
    /// 1-indexed lexical rank, 0 when absent from lexical results.
    pub bm25_rank: usize,
    /// 1-indexed vector rank, 0 when absent from vector results.
    pub vector_rank: usize,
    pub vector_score: f64,
    /// 0 for direct matches and file-anchored learnings, hop distance for
    /// graph-expanded additions.
    pub expansion_hops: u32,
    /// Score assigned by the reranker, when one ran.
    pub rerank_score: Option<f64>,
    pub learning: Learning,
}

impl SearchResult {
    /// A direct match with only fusion data filled in.
    pub fn direct(learning: Learning, rrf_score: f64, bm25_rank: usize, vector_rank: usize, vector_score: f64) -> Self {
        Self {
            id: learning.id.clone(),
            content: learning.content.clone(),
            category: learning.category.clone(),
            relevance_score: rrf_score,
            rrf_score,
            bm25_rank,
            vector_rank,
            vector_score,
            expansion_hops: 0,
            rerank_score: None,
            learning,
        }
    }

    /// A graph-expanded addition.
    pub fn expanded(learning: Learning, decayed_score: f64, hops: u32) -> Self {
        Self {
            id: learning.id.clone(),
            content: learning.content.clone(),
            category: learning.category.clone(),
            relevance_score: decayed_score,
            rrf_score: 0.0,
            bm25_rank: 0,
            vector_rank: 0,
            vector_score: 0.0,
            expansion_hops: hops,
            rerank_score: None,
            learning,
        }
    }

    /// Whether search itself matched this learning. File-anchored additions
    /// sit at hop 0 but carry no rank.
    pub fn is_direct(&self) -> bool {
        self.bm25_rank > 0 || self.vector_rank > 0
    }
}
