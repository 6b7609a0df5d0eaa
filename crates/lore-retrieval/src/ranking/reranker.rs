//! Rerankers and the step that applies one to a result list.
//!
//! [`PassthroughReranker`] keeps the incoming order and assigns strictly
//! decreasing scores. With the `reranker` feature, [`CrossEncoderReranker`]
//! re-scores documents with fastembed's `TextRerank` cross-encoder.

use lore_core::errors::LoreResult;
#[cfg(feature = "reranker")]
use lore_core::errors::RetrievalError;
use lore_core::models::{RerankResult, SearchResult};
use lore_core::traits::IRerankerProvider;
use tracing::{debug, warn};

/// Keeps input order. Scores are `1 - i/n`: in (0, 1], strictly decreasing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughReranker;

impl IRerankerProvider for PassthroughReranker {
    fn rerank(&self, _query: &str, documents: &[String]) -> LoreResult<Vec<RerankResult>> {
        let n = documents.len() as f64;
        Ok(documents
            .iter()
            .enumerate()
            .map(|(i, doc)| RerankResult {
                document: doc.clone(),
                score: 1.0 - i as f64 / n,
                original_index: i,
            })
            .collect())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

/// Cross-encoder reranking through fastembed.
#[cfg(feature = "reranker")]
pub struct CrossEncoderReranker {
    model: std::sync::Mutex<fastembed::TextRerank>,
}

#[cfg(feature = "reranker")]
impl CrossEncoderReranker {
    /// Load the default BGE reranker model.
    pub fn try_new() -> LoreResult<Self> {
        let options = fastembed::RerankInitOptions::new(fastembed::RerankerModel::BGERerankerBase);
        let model = fastembed::TextRerank::try_new(options).map_err(|e| RetrievalError::RerankFailed {
            reason: format!("model load failed: {e}"),
        })?;
        Ok(Self {
            model: std::sync::Mutex::new(model),
        })
    }
}

#[cfg(feature = "reranker")]
impl IRerankerProvider for CrossEncoderReranker {
    fn rerank(&self, query: &str, documents: &[String]) -> LoreResult<Vec<RerankResult>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }
        let mut model = self.model.lock().map_err(|e| RetrievalError::RerankFailed {
            reason: format!("model lock poisoned: {e}"),
        })?;
        let docs: Vec<&str> = documents.iter().map(String::as_str).collect();
        let results = model
            .rerank(query, docs, false, None)
            .map_err(|e| RetrievalError::RerankFailed {
                reason: e.to_string(),
            })?;
        Ok(results
            .into_iter()
            .filter(|r| r.index < documents.len())
            .map(|r| RerankResult {
                document: documents[r.index].clone(),
                // Cross-encoder logits are unbounded; squash into [0, 1].
                score: 1.0 / (1.0 + (-(r.score as f64)).exp()),
                original_index: r.index,
            })
            .collect())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "cross-encoder"
    }
}

/// Rerank the first `top_k` results with `reranker`.
///
/// Reranked results take the reranker score as their relevance and are
/// returned best first; results past `top_k` are dropped. On failure, or when
/// the reranker returns something other than a permutation of its input, the
/// original order is kept. Returns the results and whether reranking applied.
pub fn apply(
    reranker: &dyn IRerankerProvider,
    query: &str,
    results: Vec<SearchResult>,
    top_k: usize,
) -> (Vec<SearchResult>, bool) {
    if results.is_empty() || !reranker.is_available() {
        return (results, false);
    }

    let mut results = results;
    results.truncate(top_k.max(1));
    let documents: Vec<String> = results.iter().map(|r| r.content.clone()).collect();

    let reranked = match reranker.rerank(query, &documents) {
        Ok(reranked) => reranked,
        Err(e) => {
            warn!(reranker = reranker.name(), error = %e, "rerank failed, keeping fused order");
            return (results, false);
        }
    };

    if !is_permutation(&reranked, results.len()) {
        warn!(
            reranker = reranker.name(),
            returned = reranked.len(),
            expected = results.len(),
            "reranker returned a malformed ranking, keeping fused order"
        );
        return (results, false);
    }

    let mut slots: Vec<Option<SearchResult>> = results.into_iter().map(Some).collect();
    let mut out: Vec<SearchResult> = Vec::with_capacity(slots.len());
    for r in &reranked {
        if let Some(mut result) = slots[r.original_index].take() {
            result.rerank_score = Some(r.score);
            result.relevance_score = r.score;
            out.push(result);
        }
    }
    out.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    debug!(reranker = reranker.name(), count = out.len(), "rerank applied");
    (out, true)
}

fn is_permutation(reranked: &[RerankResult], n: usize) -> bool {
    if reranked.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for r in reranked {
        if r.original_index >= n || seen[r.original_index] || !r.score.is_finite() {
            return false;
        }
        seen[r.original_index] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_core::errors::RetrievalError;
    use lore_core::Learning;

    fn result(id: &str, score: f64) -> SearchResult {
        SearchResult::direct(Learning::new(format!("doc {id}")).with_id(id), score, 1, 0, 0.0)
    }

    struct Reverse;

    impl IRerankerProvider for Reverse {
        fn rerank(&self, _q: &str, documents: &[String]) -> LoreResult<Vec<RerankResult>> {
            let n = documents.len();
            Ok((0..n)
                .rev()
                .enumerate()
                .map(|(pos, i)| RerankResult {
                    document: documents[i].clone(),
                    score: 1.0 - pos as f64 / n as f64,
                    original_index: i,
                })
                .collect())
        }
        fn is_available(&self) -> bool {
            true
        }
        fn name(&self) -> &str {
            "reverse"
        }
    }

    struct Failing;

    impl IRerankerProvider for Failing {
        fn rerank(&self, _q: &str, _d: &[String]) -> LoreResult<Vec<RerankResult>> {
            Err(RetrievalError::RerankFailed {
                reason: "model crashed".into(),
            }
            .into())
        }
        fn is_available(&self) -> bool {
            true
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn passthrough_scores_strictly_decrease_in_unit_range() {
        let docs: Vec<String> = (0..7).map(|i| format!("d{i}")).collect();
        let out = PassthroughReranker.rerank("q", &docs).unwrap();
        assert_eq!(out.len(), 7);
        assert_eq!(out[0].score, 1.0);
        for (i, pair) in out.windows(2).enumerate() {
            assert!(pair[0].score > pair[1].score);
            assert_eq!(pair[0].original_index, i);
        }
        assert!(out.iter().all(|r| r.score > 0.0 && r.score <= 1.0));
    }

    #[test]
    fn passthrough_keeps_order() {
        let input = vec![result("a", 0.3), result("b", 0.2), result("c", 0.1)];
        let (out, applied) = apply(&PassthroughReranker, "q", input, 10);
        assert!(applied);
        let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(out[0].rerank_score, Some(1.0));
    }

    #[test]
    fn reranker_reorders_and_rescores() {
        let input = vec![result("a", 0.3), result("b", 0.2), result("c", 0.1)];
        let (out, applied) = apply(&Reverse, "q", input, 10);
        assert!(applied);
        let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(out[0].relevance_score, 1.0);
    }

    #[test]
    fn failure_keeps_fused_order() {
        let input = vec![result("a", 0.3), result("b", 0.2)];
        let (out, applied) = apply(&Failing, "q", input, 10);
        assert!(!applied);
        let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(out.iter().all(|r| r.rerank_score.is_none()));
    }

    #[test]
    fn top_k_truncates_before_rerank() {
        let input = vec![result("a", 0.3), result("b", 0.2), result("c", 0.1)];
        let (out, _) = apply(&PassthroughReranker, "q", input, 2);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn malformed_ranking_is_rejected() {
        let bad = vec![RerankResult {
            document: "x".into(),
            score: 0.5,
            original_index: 3,
        }];
        assert!(!is_permutation(&bad, 1));
        assert!(!is_permutation(&bad, 2));
    }
}
