//! Query performance logging: query text, latency, result composition.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub latency: Duration,
    pub result_count: usize,
    /// Results that matched the query directly.
    pub direct_count: usize,
    /// Results added by graph or file expansion.
    pub expanded_count: usize,
    pub vector_used: bool,
    pub reranked: bool,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(query: impl Into<String>, latency: Duration, direct_count: usize, expanded_count: usize) -> Self {
        Self {
            query: query.into(),
            latency,
            result_count: direct_count + expanded_count,
            direct_count,
            expanded_count,
            vector_used: false,
            reranked: false,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_vector(mut self, used: bool) -> Self {
        self.vector_used = used;
        self
    }

    pub fn with_rerank(mut self, reranked: bool) -> Self {
        self.reranked = reranked;
        self
    }
}

/// Bounded query log. The oldest entries are dropped past capacity.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(lore_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }

    /// Create with a custom capacity (at least 1).
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a query.
    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            expanded_count = entry.expanded_count,
            vector_used = entry.vector_used,
            "query logged"
        );

        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&QueryLogEntry> {
        self.entries.back()
    }

    /// Average latency across all logged queries.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0-1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let p = p.clamp(0.0, 1.0);
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    /// Total number of retained queries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ms: u64) -> QueryLogEntry {
        QueryLogEntry::new("q", Duration::from_millis(ms), 1, 0)
    }

    #[test]
    fn ring_drops_oldest() {
        let mut log = QueryLog::with_capacity(3);
        for ms in 1..=5 {
            log.record(entry(ms));
        }
        assert_eq!(log.count(), 3);
        let latencies: Vec<u64> = log.entries().map(|e| e.latency.as_millis() as u64).collect();
        assert_eq!(latencies, vec![3, 4, 5]);
    }

    #[test]
    fn percentiles() {
        let mut log = QueryLog::with_capacity(100);
        for ms in 1..=100 {
            log.record(entry(ms));
        }
        assert_eq!(log.latency_percentile(0.0), Duration::from_millis(1));
        assert_eq!(log.latency_percentile(1.0), Duration::from_millis(100));
        assert_eq!(log.latency_percentile(0.5), Duration::from_millis(51));
    }

    #[test]
    fn empty_log_reports_zero() {
        let log = QueryLog::new();
        assert_eq!(log.avg_latency(), Duration::ZERO);
        assert_eq!(log.latency_percentile(0.95), Duration::ZERO);
        assert!(log.last().is_none());
    }
}
