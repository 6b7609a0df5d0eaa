//! Recency and outcome boosts added on top of fused or decayed scores.

use chrono::{DateTime, Utc};

use lore_core::config::RetrievalConfig;
use lore_core::Learning;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Boost weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerWeights {
    pub recency_weight: f64,
    pub recency_half_life_days: f64,
    pub outcome_weight: f64,
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

impl ScorerWeights {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            recency_weight: config.recency_weight,
            recency_half_life_days: config.recency_half_life_days,
            outcome_weight: config.outcome_weight,
        }
    }

    /// `recency_weight * exp(-age_days / half_life)`, age measured from the last
    /// use or else creation. Future timestamps count as age 0.
    pub fn recency_boost(&self, learning: &Learning, now: DateTime<Utc>) -> f64 {
        if self.recency_weight == 0.0 || self.recency_half_life_days <= 0.0 {
            return 0.0;
        }
        let age_secs = (now - learning.recency_anchor()).num_seconds().max(0) as f64;
        let age_days = age_secs / SECONDS_PER_DAY;
        self.recency_weight * (-age_days / self.recency_half_life_days).exp()
    }

    /// `outcome_weight * outcome_score`, 0 when no outcome was reported.
    pub fn outcome_boost(&self, learning: &Learning) -> f64 {
        learning
            .outcome_score
            .map_or(0.0, |score| self.outcome_weight * score)
    }

    /// Sum of both boosts.
    pub fn boost(&self, learning: &Learning, now: DateTime<Utc>) -> f64 {
        self.recency_boost(learning, now) + self.outcome_boost(learning)
    }
}
