//! Ranking: recency/outcome boosts and optional reranking.

pub mod reranker;
pub mod scorer;

pub use reranker::PassthroughReranker;
#[cfg(feature = "reranker")]
pub use reranker::CrossEncoderReranker;
pub use scorer::ScorerWeights;
