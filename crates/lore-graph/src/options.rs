use lore_core::config::ExpansionConfig;
use lore_core::config::defaults;
use lore_core::constants::MAX_EXPANSION_DEPTH;
use lore_core::errors::{LoreResult, ValidationError};
use lore_core::Direction;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::filter::EdgeTypeFilter;

/// Options for one expansion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionOptions {
    /// Hops to traverse. 0 returns the seeds only.
    pub depth: u32,
    /// Per-hop attenuation. Values above 1 amplify and are allowed.
    pub decay_factor: f64,
    /// Cap on seeds plus expanded nodes.
    pub max_nodes: usize,
    pub edge_types: EdgeTypeFilter,
    pub direction: Direction,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            depth: defaults::DEFAULT_EXPANSION_DEPTH,
            decay_factor: defaults::DEFAULT_DECAY_FACTOR,
            max_nodes: defaults::DEFAULT_MAX_NODES,
            edge_types: EdgeTypeFilter::Any,
            direction: Direction::Outbound,
        }
    }
}

impl ExpansionOptions {
    pub fn from_config(config: &ExpansionConfig) -> Self {
        Self {
            depth: config.default_depth,
            decay_factor: config.default_decay_factor,
            max_nodes: config.default_max_nodes,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_decay(mut self, decay_factor: f64) -> Self {
        self.decay_factor = decay_factor;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_edge_types(mut self, edge_types: EdgeTypeFilter) -> Self {
        self.edge_types = edge_types;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Check every option. Runs before any store access.
    pub fn validate(&self) -> LoreResult<()> {
        if self.depth > MAX_EXPANSION_DEPTH {
            return Err(ValidationError::DepthTooLarge {
                depth: self.depth,
                max: MAX_EXPANSION_DEPTH,
            }
            .into());
        }
        if !self.decay_factor.is_finite() || self.decay_factor <= 0.0 {
            return Err(ValidationError::InvalidDecayFactor {
                value: self.decay_factor,
            }
            .into());
        }
        if self.decay_factor > 1.0 {
            warn!(
                decay_factor = self.decay_factor,
                "decay factor above 1 amplifies scores with distance"
            );
        }
        if self.max_nodes == 0 {
            return Err(ValidationError::InvalidMaxNodes {
                value: self.max_nodes,
            }
            .into());
        }
        self.edge_types.validate()?;
        Ok(())
    }
}
