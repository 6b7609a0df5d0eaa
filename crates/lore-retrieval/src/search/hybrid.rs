//! HybridSearcher: lexical (FTS5 BM25) + optional vector search, fused with RRF.

use lore_core::errors::LoreResult;
use lore_core::models::VectorHit;
use lore_core::traits::{IEmbeddingProvider, ILearningStore};
use lore_observability::{embedding_span, storage_span};
use tracing::{debug, warn};

use super::rrf_fusion::{self, FusedCandidate};

/// Fused candidates plus how the vector side behaved.
#[derive(Debug, Clone, Default)]
pub struct SearchCandidates {
    pub fused: Vec<FusedCandidate>,
    pub lexical_count: usize,
    pub vector_count: usize,
    /// A provider was available and answered.
    pub vector_used: bool,
    /// A provider was available but failed, so the search ran lexical-only.
    pub vector_failed: bool,
}

/// Gathers and fuses candidates for one query.
pub struct HybridSearcher<'a> {
    learnings: &'a dyn ILearningStore,
    embeddings: Option<&'a dyn IEmbeddingProvider>,
    rrf_k: u32,
}

impl<'a> HybridSearcher<'a> {
    pub fn new(
        learnings: &'a dyn ILearningStore,
        embeddings: Option<&'a dyn IEmbeddingProvider>,
        rrf_k: u32,
    ) -> Self {
        Self {
            learnings,
            embeddings,
            rrf_k,
        }
    }

    /// Run both searches with `limit` candidates each and fuse them.
    ///
    /// Lexical failures propagate. Vector failures are logged and leave the
    /// vector list empty.
    pub fn search(&self, query: &str, limit: usize) -> LoreResult<SearchCandidates> {
        let lexical = {
            let _span = storage_span!("lexical_search").entered();
            self.learnings.lexical_search(query, limit)?
        };

        let (vector, vector_used, vector_failed) = match self.vector_hits(query, limit) {
            None => (Vec::new(), false, false),
            Some(Ok(hits)) => (hits, true, false),
            Some(Err(e)) => {
                warn!(error = %e, "vector search failed, falling back to lexical-only");
                (Vec::new(), false, true)
            }
        };

        let fused = rrf_fusion::fuse(&lexical, &vector, self.rrf_k);
        debug!(
            lexical = lexical.len(),
            vector = vector.len(),
            fused = fused.len(),
            "hybrid search fused candidates"
        );

        Ok(SearchCandidates {
            fused,
            lexical_count: lexical.len(),
            vector_count: vector.len(),
            vector_used,
            vector_failed,
        })
    }

    /// `None` when no provider is configured or it is unavailable.
    fn vector_hits(&self, query: &str, limit: usize) -> Option<LoreResult<Vec<VectorHit>>> {
        let provider = self.embeddings.filter(|p| p.is_available())?;
        let _span = embedding_span!(provider.name()).entered();
        Some(
            provider
                .embed(query)
                .and_then(|embedding| provider.nearest_neighbors(&embedding, limit)),
        )
    }
}
