//! Integration test: metrics, query log, span macros and tracing setup.

use std::time::Duration;

use lore_core::config::ObservabilityConfig;
use lore_observability::tracing_setup::spans::names;
use lore_observability::{
    embedding_span, expansion_span, init_tracing, init_tracing_with_filter, search_span,
    storage_span, QueryLog, QueryLogEntry, RetrievalMetrics,
};

#[test]
fn metrics_rates() {
    let mut m = RetrievalMetrics::new();
    m.record_query(3);
    m.record_query(0);
    m.record_query(1);
    assert_eq!(m.queries, 3);
    assert_eq!(m.hits, 2);
    assert!((m.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
    assert!((m.avg_results() - 4.0 / 3.0).abs() < 1e-9);

    m.record_expansion(4);
    m.record_expansion(0);
    assert!((m.expansion_yield() - 2.0).abs() < 1e-9);

    m.record_rerank(true);
    m.record_rerank(false);
    assert_eq!(m.rerank_runs, 2);
    assert_eq!(m.rerank_failures, 1);

    m.reset();
    assert_eq!(m.queries, 0);
    assert_eq!(m.hit_rate(), 0.0);
}

#[test]
fn most_returned_is_sorted() {
    let mut m = RetrievalMetrics::new();
    for id in ["a", "b", "b", "c", "b", "c"] {
        m.record_returned(id);
    }
    assert_eq!(m.most_returned[0], ("b".to_string(), 3));
    assert_eq!(m.most_returned[1], ("c".to_string(), 2));
    assert_eq!(m.most_returned[2], ("a".to_string(), 1));
}

#[test]
fn metrics_serialize() {
    let mut m = RetrievalMetrics::new();
    m.record_query(2);
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["queries"], 1);
    assert_eq!(json["total_results"], 2);
}

#[test]
fn query_log_entry_composition() {
    let entry = QueryLogEntry::new("retry policy", Duration::from_millis(4), 3, 2)
        .with_vector(true)
        .with_rerank(false);
    assert_eq!(entry.result_count, 5);
    assert!(entry.vector_used);
    assert!(entry.timestamp_epoch_ms > 0);

    let mut log = QueryLog::with_capacity(0);
    assert_eq!(log.capacity(), 1);
    log.record(entry);
    log.record(QueryLogEntry::new("second", Duration::from_millis(8), 0, 0));
    assert_eq!(log.count(), 1);
    assert_eq!(log.last().unwrap().query, "second");
    log.clear();
    assert_eq!(log.count(), 0);
}

#[test]
fn span_macros_carry_names() {
    init_tracing_with_filter("debug");
    let spans = [
        search_span!("q", 10),
        expansion_span!(3, 2),
        embedding_span!("tfidf"),
        storage_span!("lexical_search"),
    ];
    for span in &spans {
        let _entered = span.enter();
    }
    let expected = [names::SEARCH, names::EXPANSION, names::EMBEDDING, names::STORAGE];
    for (span, name) in spans.iter().zip(expected) {
        if let Some(meta) = span.metadata() {
            assert_eq!(meta.name(), name);
        }
    }
}

#[test]
fn init_tracing_is_idempotent() {
    let config = ObservabilityConfig::default();
    init_tracing(&config);
    init_tracing(&config);
    tracing::info!(test = "init_tracing_is_idempotent", "still logging");
}
