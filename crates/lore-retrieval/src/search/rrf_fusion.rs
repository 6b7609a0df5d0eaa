//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Combines the lexical and vector rankings into a single fused ranking without
//! requiring score normalization across the two retrieval methods.

use std::collections::HashMap;

use lore_core::models::{LexicalHit, VectorHit};

/// A candidate after RRF fusion.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedCandidate {
    pub id: String,
    /// Fused RRF score (higher = more relevant).
    pub rrf_score: f64,
    /// 1-indexed lexical rank, 0 when absent.
    pub bm25_rank: usize,
    /// 1-indexed vector rank, 0 when absent.
    pub vector_rank: usize,
    pub vector_score: f64,
}

/// RRF contribution of a single 1-indexed rank.
pub fn rrf_term(rank: usize, k: u32) -> f64 {
    1.0 / (k as f64 + rank as f64)
}

/// Fuse lexical and vector hits.
///
/// Result is sorted by RRF score descending; ties keep first-seen order
/// (lexical hits before vector-only hits).
pub fn fuse(lexical: &[LexicalHit], vector: &[VectorHit], k: u32) -> Vec<FusedCandidate> {
    let mut candidates: Vec<FusedCandidate> = Vec::with_capacity(lexical.len() + vector.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for hit in lexical {
        if index.contains_key(&hit.id) {
            continue;
        }
        index.insert(hit.id.clone(), candidates.len());
        candidates.push(FusedCandidate {
            id: hit.id.clone(),
            rrf_score: rrf_term(hit.rank, k),
            bm25_rank: hit.rank,
            vector_rank: 0,
            vector_score: 0.0,
        });
    }

    for hit in vector {
        match index.get(&hit.id) {
            Some(&i) => {
                let c = &mut candidates[i];
                if c.vector_rank == 0 {
                    c.rrf_score += rrf_term(hit.rank, k);
                    c.vector_rank = hit.rank;
                    c.vector_score = hit.score;
                }
            }
            None => {
                index.insert(hit.id.clone(), candidates.len());
                candidates.push(FusedCandidate {
                    id: hit.id.clone(),
                    rrf_score: rrf_term(hit.rank, k),
                    bm25_rank: 0,
                    vector_rank: hit.rank,
                    vector_score: hit.score,
                });
            }
        }
    }

    // Sort by RRF score descending (monotonically decreasing).
    candidates.sort_by(|a, b| {
        b.rrf_score
            .partial_cmp(&a.rrf_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(id: &str, rank: usize) -> LexicalHit {
        LexicalHit {
            id: id.to_string(),
            rank,
            bm25: -1.0,
        }
    }

    fn vec_hit(id: &str, rank: usize, score: f64) -> VectorHit {
        VectorHit {
            id: id.to_string(),
            rank,
            score,
        }
    }

    #[test]
    fn rank_one_lexical_only() {
        let fused = fuse(&[lex("a", 1)], &[], 60);
        assert_eq!(fused.len(), 1);
        assert!((fused[0].rrf_score - 1.0 / 61.0).abs() < 1e-12);
        assert_eq!(fused[0].bm25_rank, 1);
        assert_eq!(fused[0].vector_rank, 0);
        assert_eq!(fused[0].vector_score, 0.0);
    }

    #[test]
    fn both_lists_sum() {
        let fused = fuse(&[lex("a", 2)], &[vec_hit("a", 1, 0.9)], 60);
        assert!((fused[0].rrf_score - (1.0 / 62.0 + 1.0 / 61.0)).abs() < 1e-12);
        assert_eq!(fused[0].vector_rank, 1);
        assert_eq!(fused[0].vector_score, 0.9);
    }

    #[test]
    fn present_in_both_beats_single_list() {
        let fused = fuse(
            &[lex("a", 1), lex("b", 2)],
            &[vec_hit("b", 1, 0.8), vec_hit("c", 2, 0.5)],
            60,
        );
        let ids: Vec<&str> = fused.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let fused = fuse(&[lex("a", 1)], &[vec_hit("v", 1, 0.3)], 60);
        let ids: Vec<&str> = fused.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "v"]);
    }

    #[test]
    fn duplicate_ids_counted_once_per_list() {
        let fused = fuse(&[lex("a", 1), lex("a", 2)], &[], 60);
        assert_eq!(fused.len(), 1);
        assert!((fused[0].rrf_score - 1.0 / 61.0).abs() < 1e-12);
    }
}
