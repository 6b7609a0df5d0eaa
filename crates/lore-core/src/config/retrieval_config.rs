use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// Result limit used when a caller does not supply one.
    pub default_limit: usize,
    /// Over-fetch factor applied to the limit for each ranked source list.
    pub candidate_multiplier: usize,
    /// Number of candidates handed to the reranker.
    pub rerank_top_k: usize,
    /// Maximum boost contributed by recency.
    pub recency_weight: f64,
    /// Age in days at which the recency boost has decayed by 1/e.
    pub recency_half_life_days: f64,
    /// Boost per unit of outcome score.
    pub outcome_weight: f64,
    /// Number of top direct matches used as graph expansion seeds.
    pub expansion_seed_count: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            default_limit: defaults::DEFAULT_SEARCH_LIMIT,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            rerank_top_k: defaults::DEFAULT_RERANK_TOP_K,
            recency_weight: defaults::DEFAULT_RECENCY_WEIGHT,
            recency_half_life_days: defaults::DEFAULT_RECENCY_HALF_LIFE_DAYS,
            outcome_weight: defaults::DEFAULT_OUTCOME_WEIGHT,
            expansion_seed_count: defaults::DEFAULT_EXPANSION_SEED_COUNT,
        }
    }
}
