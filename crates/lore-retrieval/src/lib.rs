//! # lore-retrieval
//!
//! Hybrid retrieval over learnings: FTS5 BM25 and vector search fused with
//! Reciprocal Rank Fusion, recency and outcome boosts, optional graph
//! expansion from the top matches, and optional cross-encoder reranking.
//! [`RetrievalEngine::context_for_task`] adds learnings anchored to the
//! files a task touches and records their usage.

pub mod engine;
pub mod options;
pub mod ranking;
pub mod search;
pub mod task_context;

pub use engine::RetrievalEngine;
pub use options::{GraphExpansion, SearchOptions};
pub use ranking::PassthroughReranker;
#[cfg(feature = "reranker")]
pub use ranking::CrossEncoderReranker;
