use lore_core::config::{defaults, ExpansionConfig, RetrievalConfig};
use lore_core::errors::{LoreResult, ValidationError};
use lore_graph::ExpansionOptions;
use serde::{Deserialize, Serialize};

/// Graph expansion settings for a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphExpansion {
    pub enabled: bool,
    /// Top direct matches used as seeds.
    pub seed_count: usize,
    #[serde(flatten)]
    pub options: ExpansionOptions,
}

impl Default for GraphExpansion {
    fn default() -> Self {
        Self {
            enabled: false,
            seed_count: defaults::DEFAULT_EXPANSION_SEED_COUNT,
            options: ExpansionOptions::default(),
        }
    }
}

impl GraphExpansion {
    pub fn enabled(options: ExpansionOptions) -> Self {
        Self {
            enabled: true,
            options,
            ..Self::default()
        }
    }
}

/// Per-call search options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Maximum results returned. Must be at least 1.
    pub limit: usize,
    /// Results scoring below this are dropped.
    pub min_score: Option<f64>,
    pub graph_expansion: GraphExpansion,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: defaults::DEFAULT_SEARCH_LIMIT,
            min_score: None,
            graph_expansion: GraphExpansion::default(),
        }
    }
}

impl SearchOptions {
    /// Defaults taken from configuration.
    pub fn from_config(retrieval: &RetrievalConfig, expansion: &ExpansionConfig) -> Self {
        Self {
            limit: retrieval.default_limit,
            min_score: None,
            graph_expansion: GraphExpansion {
                enabled: false,
                seed_count: retrieval.expansion_seed_count,
                options: ExpansionOptions::from_config(expansion),
            },
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    pub fn with_expansion(mut self, options: ExpansionOptions) -> Self {
        self.graph_expansion = GraphExpansion {
            enabled: true,
            seed_count: self.graph_expansion.seed_count,
            options,
        };
        self
    }

    pub fn with_seed_count(mut self, seed_count: usize) -> Self {
        self.graph_expansion.seed_count = seed_count;
        self
    }

    /// Check the options. Expansion options are checked whenever they may run.
    pub fn validate(&self) -> LoreResult<()> {
        if self.limit == 0 {
            return Err(ValidationError::InvalidLimit { value: self.limit }.into());
        }
        if let Some(min_score) = self.min_score {
            if !min_score.is_finite() {
                return Err(ValidationError::InvalidScore {
                    field: "min_score",
                    value: min_score,
                }
                .into());
            }
        }
        if self.graph_expansion.enabled {
            self.graph_expansion.options.validate()?;
        }
        Ok(())
    }
}
