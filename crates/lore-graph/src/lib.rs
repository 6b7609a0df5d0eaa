//! # lore-graph
//!
//! Graph expansion over the learning graph: level-synchronous BFS from seed
//! learnings (or from file paths through their anchors) with multiplicative
//! weight decay, cycle prevention and per-hop edge-type filtering.
//!
//! The engine holds no graph in memory. Every hop asks the edge store for the
//! edges of the current frontier, so results always reflect store state at call
//! time.

pub mod engine;
pub mod file_expansion;
pub mod filter;
pub mod options;

pub use engine::ExpansionEngine;
pub use filter::{EdgeTypeFilter, HopFilter};
pub use options::ExpansionOptions;
