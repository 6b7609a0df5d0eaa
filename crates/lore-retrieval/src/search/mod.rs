//! Candidate gathering: lexical + vector search fused with RRF.

pub mod hybrid;
pub mod rrf_fusion;

pub use hybrid::{HybridSearcher, SearchCandidates};
pub use rrf_fusion::{fuse, FusedCandidate};
