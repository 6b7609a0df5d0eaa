//! Hit rate, result composition, expansion yield, rerank and vector fallback counts.

use serde::{Deserialize, Serialize};

/// Number of most-returned learnings kept.
const MOST_RETURNED_LIMIT: usize = 100;

/// Tracks retrieval effectiveness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    pub queries: u64,
    /// Queries that returned at least one result.
    pub hits: u64,
    pub total_results: u64,
    /// Expansion runs and the results they contributed.
    pub expansion_runs: u64,
    pub expanded_results: u64,
    pub rerank_runs: u64,
    pub rerank_failures: u64,
    /// Queries that fell back to lexical-only because vector search failed.
    pub vector_fallbacks: u64,
    /// Learning ids ranked by how often they were returned.
    pub most_returned: Vec<(String, u64)>,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed query.
    pub fn record_query(&mut self, result_count: usize) {
        self.queries += 1;
        if result_count > 0 {
            self.hits += 1;
        }
        self.total_results += result_count as u64;
    }

    /// Record an expansion run and how many results it added.
    pub fn record_expansion(&mut self, added: usize) {
        self.expansion_runs += 1;
        self.expanded_results += added as u64;
    }

    pub fn record_rerank(&mut self, succeeded: bool) {
        self.rerank_runs += 1;
        if !succeeded {
            self.rerank_failures += 1;
        }
    }

    pub fn record_vector_fallback(&mut self) {
        self.vector_fallbacks += 1;
    }

    /// Record that a learning was returned.
    pub fn record_returned(&mut self, learning_id: &str) {
        if let Some(entry) = self.most_returned.iter_mut().find(|(id, _)| id == learning_id) {
            entry.1 += 1;
        } else {
            self.most_returned.push((learning_id.to_string(), 1));
        }
        self.most_returned.sort_by(|a, b| b.1.cmp(&a.1));
        self.most_returned.truncate(MOST_RETURNED_LIMIT);
    }

    /// Fraction of queries that returned something.
    pub fn hit_rate(&self) -> f64 {
        if self.queries == 0 {
            return 0.0;
        }
        self.hits as f64 / self.queries as f64
    }

    pub fn avg_results(&self) -> f64 {
        if self.queries == 0 {
            return 0.0;
        }
        self.total_results as f64 / self.queries as f64
    }

    /// Average results added per expansion run.
    pub fn expansion_yield(&self) -> f64 {
        if self.expansion_runs == 0 {
            return 0.0;
        }
        self.expanded_results as f64 / self.expansion_runs as f64
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
