//! # lore-observability
//!
//! Tracing subscriber setup and span macros, an in-memory query log, and
//! retrieval metrics. The retrieval engine records into [`QueryLog`] and
//! [`RetrievalMetrics`] when they are attached.

pub mod metrics;
pub mod query_log;
pub mod tracing_setup;

pub use metrics::RetrievalMetrics;
pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
