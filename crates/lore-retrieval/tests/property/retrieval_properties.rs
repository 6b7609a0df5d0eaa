//! Property tests for lore-retrieval: ordering, limit, uniqueness and RRF bounds.

use std::collections::HashSet;

use proptest::prelude::*;

use lore_core::config::RetrievalConfig;
use lore_core::models::{LexicalHit, VectorHit};
use lore_core::traits::{IEdgeStore, ILearningStore};
use lore_core::{Edge, EdgeType, Learning, NodeRef};
use lore_graph::ExpansionOptions;
use lore_retrieval::search::fuse;
use lore_retrieval::{PassthroughReranker, RetrievalEngine, SearchOptions};
use lore_storage::StorageEngine;

const VOCAB: [&str; 6] = ["cache", "retry", "pool", "lock", "queue", "index"];
const DOCS: usize = 10;

/// `DOCS` learnings built from word indices, some inactive, linked by random edges.
fn build_store(docs: &[(Vec<usize>, bool)], edges: &[(usize, usize)]) -> StorageEngine {
    let storage = StorageEngine::open_in_memory().unwrap();
    for (i, (words, active)) in docs.iter().enumerate() {
        let content: Vec<&str> = words.iter().map(|w| VOCAB[*w]).collect();
        let mut learning = Learning::new(format!("{} note {i}", content.join(" "))).with_id(format!("d{i}"));
        learning.active = *active;
        storage.create(&learning).unwrap();
    }
    for &(src, tgt) in edges {
        storage
            .create_edge(&Edge::new(
                EdgeType::LinksTo,
                NodeRef::learning(format!("d{src}")),
                NodeRef::learning(format!("d{tgt}")),
            ))
            .unwrap();
    }
    storage
}

fn docs_strategy() -> impl Strategy<Value = Vec<(Vec<usize>, bool)>> {
    prop::collection::vec(
        (prop::collection::vec(0..VOCAB.len(), 1..4), prop::bool::weighted(0.8)),
        DOCS,
    )
}

fn edges_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..DOCS, 0..DOCS), 0..DOCS * 2)
}

fn ranked_ids(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(0..20_usize, 0..max)
        .prop_map(|set| set.into_iter().map(|i| format!("x{i}")).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_results_sorted_unique_and_bounded(
        docs in docs_strategy(),
        edges in edges_strategy(),
        query_word in 0..VOCAB.len(),
        limit in 1_usize..8,
        expand in any::<bool>(),
        rerank in any::<bool>(),
    ) {
        let storage = build_store(&docs, &edges);
        let mut engine = RetrievalEngine::new(&storage, &storage, &storage, RetrievalConfig::default());
        if rerank {
            engine = engine.with_reranker(&PassthroughReranker);
        }
        let mut options = SearchOptions::default().with_limit(limit);
        if expand {
            options = options.with_expansion(ExpansionOptions::default());
        }

        let results = engine.search(VOCAB[query_word], &options).unwrap();

        prop_assert!(results.len() <= limit);
        let unique: HashSet<&str> = results.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(unique.len(), results.len());
        for pair in results.windows(2) {
            prop_assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        for r in &results {
            prop_assert!(r.learning.active);
            prop_assert!(r.relevance_score.is_finite());
            if r.is_direct() {
                prop_assert!(r.bm25_rank >= 1);
            } else {
                prop_assert!(expand);
                prop_assert_eq!(r.rrf_score, 0.0);
            }
            if rerank {
                prop_assert!(r.relevance_score > 0.0 && r.relevance_score <= 1.0);
            }
        }
    }

    #[test]
    fn prop_rrf_scores_bounded_by_list_count(
        lexical in ranked_ids(10),
        vector in ranked_ids(10),
        k in 1_u32..100,
    ) {
        let lexical_hits: Vec<LexicalHit> = lexical
            .iter()
            .enumerate()
            .map(|(i, id)| LexicalHit { id: id.clone(), rank: i + 1, bm25: -1.0 })
            .collect();
        let vector_hits: Vec<VectorHit> = vector
            .iter()
            .enumerate()
            .map(|(i, id)| VectorHit { id: id.clone(), rank: i + 1, score: 0.5 })
            .collect();

        let fused = fuse(&lexical_hits, &vector_hits, k);
        let all: HashSet<&String> = lexical.iter().chain(vector.iter()).collect();
        prop_assert_eq!(fused.len(), all.len());

        let ceiling = 2.0 / (k as f64 + 1.0);
        for c in &fused {
            prop_assert!(c.rrf_score > 0.0 && c.rrf_score <= ceiling + 1e-12);
            prop_assert_eq!(c.bm25_rank > 0, lexical.contains(&c.id));
            prop_assert_eq!(c.vector_rank > 0, vector.contains(&c.id));
        }
        for pair in fused.windows(2) {
            prop_assert!(pair[0].rrf_score >= pair[1].rrf_score);
        }
    }
}
