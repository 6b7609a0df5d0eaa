//! Result and request shapes shared by the engines and their callers.

mod expansion;
mod rerank;
mod search;
mod task_context;

pub use expansion::{
    ExpandedNode, ExpansionResult, ExpansionStats, FileExpansionResult, FileExpansionStats, Seed,
};
pub use rerank::RerankResult;
pub use search::{LexicalHit, SearchResult, VectorHit};
pub use task_context::{TaskContext, TaskContextResult};
