//! RetrievalEngine: orchestrates the hybrid search pipeline.
//!
//! lexical + vector → RRF → recency/outcome boosts → graph expansion →
//! optional rerank → min_score → limit.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Instant;

use chrono::{DateTime, Utc};
use lore_core::config::RetrievalConfig;
use lore_core::errors::LoreResult;
use lore_core::models::{SearchResult, Seed};
use lore_core::traits::{IAnchorStore, IEdgeStore, IEmbeddingProvider, ILearningStore, IRerankerProvider};
use lore_core::Learning;
use lore_graph::ExpansionEngine;
use lore_observability::{expansion_span, search_span, QueryLog, QueryLogEntry, RetrievalMetrics};
use tracing::{debug, info, warn};

use crate::options::SearchOptions;
use crate::ranking::reranker;
use crate::ranking::ScorerWeights;
use crate::search::HybridSearcher;

/// What happened during one search, for logging and metrics.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SearchTrace {
    pub direct_count: usize,
    pub expanded_count: usize,
    pub expansion_ran: bool,
    pub vector_used: bool,
    pub vector_failed: bool,
    pub rerank: Option<bool>,
}

/// The main retrieval engine. Borrows its stores and providers; holds no
/// state between calls apart from the optional query log and metrics.
pub struct RetrievalEngine<'a> {
    pub(crate) learnings: &'a dyn ILearningStore,
    pub(crate) edges: &'a dyn IEdgeStore,
    pub(crate) anchors: &'a dyn IAnchorStore,
    embeddings: Option<&'a dyn IEmbeddingProvider>,
    reranker: Option<&'a dyn IRerankerProvider>,
    pub(crate) config: RetrievalConfig,
    pub(crate) weights: ScorerWeights,
    query_log: Option<&'a Mutex<QueryLog>>,
    metrics: Option<&'a Mutex<RetrievalMetrics>>,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(
        learnings: &'a dyn ILearningStore,
        edges: &'a dyn IEdgeStore,
        anchors: &'a dyn IAnchorStore,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            learnings,
            edges,
            anchors,
            embeddings: None,
            reranker: None,
            weights: ScorerWeights::from_config(&config),
            config,
            query_log: None,
            metrics: None,
        }
    }

    /// Enable vector search through `provider`.
    pub fn with_embeddings(mut self, provider: &'a dyn IEmbeddingProvider) -> Self {
        self.embeddings = Some(provider);
        self
    }

    pub fn with_reranker(mut self, reranker: &'a dyn IRerankerProvider) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Record every query into `log`.
    pub fn with_query_log(mut self, log: &'a Mutex<QueryLog>) -> Self {
        self.query_log = Some(log);
        self
    }

    pub fn with_metrics(mut self, metrics: &'a Mutex<RetrievalMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub(crate) fn expansion_engine(&self) -> ExpansionEngine<'a> {
        ExpansionEngine::new(self.learnings, self.edges, self.anchors)
    }

    /// Search for learnings relevant to `query`.
    ///
    /// Results are sorted by `relevance_score` descending. A blank query
    /// returns nothing. Vector search failures degrade to lexical-only.
    pub fn search(&self, query: &str, options: &SearchOptions) -> LoreResult<Vec<SearchResult>> {
        options.validate()?;
        let start = Instant::now();
        let (results, trace) = self.search_validated(query, options)?;
        self.observe(query, start, &results, trace);
        Ok(results)
    }

    /// The search pipeline after option validation.
    pub(crate) fn search_validated(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> LoreResult<(Vec<SearchResult>, SearchTrace)> {
        let mut trace = SearchTrace::default();
        let query = query.trim();
        if query.is_empty() {
            debug!("blank query, nothing to search");
            return Ok((Vec::new(), trace));
        }

        let _span = search_span!(query, options.limit).entered();
        let window = self.candidate_window(options.limit);

        // Stage 1: lexical + vector → RRF.
        let searcher = HybridSearcher::new(self.learnings, self.embeddings, self.config.rrf_k);
        let candidates = searcher.search(query, window)?;
        trace.vector_used = candidates.vector_used;
        trace.vector_failed = candidates.vector_failed;

        if candidates.fused.is_empty() {
            debug!("no candidates found");
            return Ok((Vec::new(), trace));
        }

        // Stage 2: hydrate and boost.
        let ids: Vec<String> = candidates.fused.iter().map(|c| c.id.clone()).collect();
        let mut by_id: HashMap<String, Learning> = self
            .learnings
            .get_bulk(&ids)?
            .into_iter()
            .map(|l| (l.id.clone(), l))
            .collect();

        let now = Utc::now();
        let mut results: Vec<SearchResult> = candidates
            .fused
            .iter()
            .filter_map(|c| {
                let learning = by_id.remove(&c.id)?;
                if !learning.is_retrievable() {
                    return None;
                }
                let boost = self.weights.boost(&learning, now);
                let mut result =
                    SearchResult::direct(learning, c.rrf_score, c.bm25_rank, c.vector_rank, c.vector_score);
                result.relevance_score += boost;
                Some(result)
            })
            .collect();
        sort_by_relevance(&mut results);
        trace.direct_count = results.len();

        info!(candidates = results.len(), "hybrid search returned candidates");

        // Stage 3: graph expansion from the top direct matches.
        if options.graph_expansion.enabled && options.graph_expansion.seed_count > 0 {
            let added = self.expand_results(&mut results, options, now)?;
            trace.expansion_ran = true;
            trace.expanded_count = added;
        }

        // Stage 4: optional rerank.
        if let Some(r) = self.reranker.filter(|r| r.is_available()) {
            let top_k = self.config.rerank_top_k.max(options.limit);
            let (reranked, applied) = reranker::apply(r, query, results, top_k);
            results = reranked;
            trace.rerank = Some(applied);
        }

        // Stage 5: threshold and limit.
        if let Some(min_score) = options.min_score {
            results.retain(|r| r.relevance_score >= min_score);
        }
        results.truncate(options.limit);

        trace.expanded_count = results.iter().filter(|r| !r.is_direct()).count();
        trace.direct_count = results.len() - trace.expanded_count;

        info!(
            results = results.len(),
            direct = trace.direct_count,
            expanded = trace.expanded_count,
            "search complete"
        );
        Ok((results, trace))
    }

    /// Add expanded learnings not already present. Returns how many were added.
    fn expand_results(
        &self,
        results: &mut Vec<SearchResult>,
        options: &SearchOptions,
        now: DateTime<Utc>,
    ) -> LoreResult<usize> {
        let seeds: Vec<Seed> = results
            .iter()
            .take(options.graph_expansion.seed_count)
            .map(|r| Seed::new(r.learning.clone(), r.relevance_score))
            .collect();
        if seeds.is_empty() {
            return Ok(0);
        }

        let expansion = {
            let _span = expansion_span!(seeds.len(), options.graph_expansion.options.depth).entered();
            self.expansion_engine()
                .expand(&seeds, &options.graph_expansion.options)?
        };

        let present: HashSet<String> = results.iter().map(|r| r.id.clone()).collect();
        let mut added = 0;
        for node in expansion.expanded {
            if present.contains(node.id()) {
                continue;
            }
            let boost = self.weights.boost(&node.learning, now);
            let mut result = SearchResult::expanded(node.learning, node.decayed_score, node.hops);
            result.relevance_score += boost;
            results.push(result);
            added += 1;
        }
        sort_by_relevance(results);
        debug!(
            seeds = expansion.stats.seed_count,
            added,
            max_nodes_reached = expansion.stats.max_nodes_reached,
            "graph expansion merged"
        );
        Ok(added)
    }

    /// Candidates fetched from each source list.
    fn candidate_window(&self, limit: usize) -> usize {
        limit
            .saturating_mul(self.config.candidate_multiplier.max(1))
            .max(self.config.rerank_top_k)
    }

    /// Feed the attached query log and metrics.
    pub(crate) fn observe(&self, query: &str, start: Instant, results: &[SearchResult], trace: SearchTrace) {
        if let Some(log) = self.query_log {
            match log.lock() {
                Ok(mut log) => log.record(
                    QueryLogEntry::new(query, start.elapsed(), trace.direct_count, trace.expanded_count)
                        .with_vector(trace.vector_used)
                        .with_rerank(trace.rerank == Some(true)),
                ),
                Err(_) => warn!("query log lock poisoned, entry dropped"),
            }
        }
        if let Some(metrics) = self.metrics {
            match metrics.lock() {
                Ok(mut m) => {
                    m.record_query(results.len());
                    if trace.expansion_ran {
                        m.record_expansion(trace.expanded_count);
                    }
                    if let Some(applied) = trace.rerank {
                        m.record_rerank(applied);
                    }
                    if trace.vector_failed {
                        m.record_vector_fallback();
                    }
                    for r in results {
                        m.record_returned(&r.id);
                    }
                }
                Err(_) => warn!("metrics lock poisoned, sample dropped"),
            }
        }
    }
}

/// Stable sort, highest relevance first.
pub(crate) fn sort_by_relevance(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
