//! EmbeddingEngine: model + vector store + L1 cache.

use tracing::{debug, info};

use lore_core::config::EmbeddingConfig;
use lore_core::errors::{EmbeddingError, LoreResult};
use lore_core::learning::Learning;
use lore_core::models::VectorHit;
use lore_core::traits::{IEmbeddingModel, IEmbeddingProvider, ILearningStore, IVectorStore};

use crate::cache::L1MemoryCache;
use crate::providers;

/// Embeds text through a cached model and answers nearest-neighbor queries
/// from the borrowed vector store.
pub struct EmbeddingEngine<'a> {
    model: Box<dyn IEmbeddingModel>,
    vectors: &'a dyn IVectorStore,
    cache: L1MemoryCache,
    enabled: bool,
}

impl<'a> EmbeddingEngine<'a> {
    /// Build the engine from configuration.
    pub fn new(config: &EmbeddingConfig, vectors: &'a dyn IVectorStore) -> Self {
        let model = providers::create_model(config);
        info!(
            model = model.name(),
            dims = model.dimensions(),
            enabled = config.enabled,
            "EmbeddingEngine initialized"
        );
        Self {
            model,
            vectors,
            cache: L1MemoryCache::new(config.l1_cache_size),
            enabled: config.enabled,
        }
    }

    /// Use a specific model instead of the configured one.
    pub fn with_model(
        model: Box<dyn IEmbeddingModel>,
        vectors: &'a dyn IVectorStore,
        l1_cache_size: u64,
    ) -> Self {
        Self {
            model,
            vectors,
            cache: L1MemoryCache::new(l1_cache_size),
            enabled: true,
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn dimensions(&self) -> usize {
        self.model.dimensions()
    }

    /// Embed `text`, consulting the L1 cache first.
    fn embed_cached(&self, text: &str) -> LoreResult<Vec<f32>> {
        let key = L1MemoryCache::key_for(text);
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "l1 cache hit");
            return Ok(hit);
        }
        let embedding = self.model.embed(text)?;
        if embedding.len() != self.model.dimensions() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.model.dimensions(),
                actual: embedding.len(),
            }
            .into());
        }
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    /// Embed one learning's content and persist it.
    pub fn index_learning(&self, learning: &Learning) -> LoreResult<()> {
        let embedding = self.embed_cached(&learning.content)?;
        self.vectors.store_embedding(
            &learning.id,
            &learning.content_hash(),
            &embedding,
            self.model.name(),
        )
    }

    /// Embed every non-deleted learning in `learnings`. Returns how many were indexed.
    pub fn index_all(&self, learnings: &dyn ILearningStore) -> LoreResult<usize> {
        let all = learnings.list()?;
        for learning in &all {
            self.index_learning(learning)?;
        }
        info!(count = all.len(), model = self.model.name(), "indexed learnings");
        Ok(all.len())
    }
}

impl IEmbeddingProvider for EmbeddingEngine<'_> {
    fn embed(&self, text: &str) -> LoreResult<Vec<f32>> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.model.name().to_string(),
            }
            .into());
        }
        self.embed_cached(text)
    }

    fn nearest_neighbors(&self, vector: &[f32], limit: usize) -> LoreResult<Vec<VectorHit>> {
        let hits = self.vectors.search_vector(vector, limit)?;
        Ok(hits
            .into_iter()
            .enumerate()
            .map(|(i, (id, score))| VectorHit {
                id,
                rank: i + 1,
                score,
            })
            .collect())
    }

    fn is_available(&self) -> bool {
        self.enabled && self.model.is_available()
    }

    fn name(&self) -> &str {
        self.model.name()
    }
}
