use serde::{Deserialize, Serialize};

use super::defaults;

/// Graph expansion defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Hops traversed when the caller does not specify a depth.
    pub default_depth: u32,
    /// Per-hop multiplicative attenuation.
    pub default_decay_factor: f64,
    /// Cap on seeds + expanded nodes.
    pub default_max_nodes: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            default_depth: defaults::DEFAULT_EXPANSION_DEPTH,
            default_decay_factor: defaults::DEFAULT_DECAY_FACTOR,
            default_max_nodes: defaults::DEFAULT_MAX_NODES,
        }
    }
}
