//! Provider used when embeddings are disabled.

use lore_core::errors::{EmbeddingError, LoreResult};
use lore_core::models::VectorHit;
use lore_core::traits::IEmbeddingProvider;

/// Never available. Hybrid search treats it as "no vector list".
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEmbeddingProvider;

impl IEmbeddingProvider for NoopEmbeddingProvider {
    fn embed(&self, _text: &str) -> LoreResult<Vec<f32>> {
        Err(EmbeddingError::ProviderUnavailable {
            provider: self.name().to_string(),
        }
        .into())
    }

    fn nearest_neighbors(&self, _vector: &[f32], _limit: usize) -> LoreResult<Vec<VectorHit>> {
        Ok(Vec::new())
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_is_unavailable_and_empty() {
        let p = NoopEmbeddingProvider;
        assert!(!p.is_available());
        assert!(p.embed("anything").is_err());
        assert!(p.nearest_neighbors(&[1.0], 5).unwrap().is_empty());
    }
}
