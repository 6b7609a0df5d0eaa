use crate::errors::LoreResult;
use crate::models::RerankResult;

/// Reorders candidate documents against a query.
pub trait IRerankerProvider: Send + Sync {
    /// One result per document, best first, scores in [0.0, 1.0].
    fn rerank(&self, query: &str, documents: &[String]) -> LoreResult<Vec<RerankResult>>;
    fn is_available(&self) -> bool;
    fn name(&self) -> &str;
}
