//! Configuration for every subsystem, loadable from TOML.
//!
//! Every section is `#[serde(default)]`, so an empty document yields the defaults
//! from [`defaults`] and partial documents override only what they name.

pub mod defaults;
pub mod embedding_config;
pub mod expansion_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod storage_config;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use expansion_config::ExpansionConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use crate::errors::{LoreError, LoreResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub expansion: ExpansionConfig,
    pub observability: ObservabilityConfig,
}

impl LoreConfig {
    /// Parse a TOML document.
    pub fn from_toml(toml_str: &str) -> LoreResult<Self> {
        toml::from_str(toml_str).map_err(|e| LoreError::ConfigError(e.to_string()))
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> LoreResult<String> {
        toml::to_string_pretty(self).map_err(|e| LoreError::ConfigError(e.to_string()))
    }
}
