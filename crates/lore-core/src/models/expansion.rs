use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::graph::EdgeType;
use crate::learning::Learning;

/// A caller-supplied starting point for graph expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Seed {
    pub learning: Learning,
    pub score: f64,
}

impl Seed {
    pub fn new(learning: Learning, score: f64) -> Self {
        Self { learning, score }
    }
}

/// A learning placed by an expansion call.
///
/// Seeds and anchored learnings have `hops == 0` and no edge weight; expanded
/// nodes have `hops >= 1` and carry the edge that reached them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpandedNode {
    pub learning: Learning,
    /// Seed score for hop 0, otherwise `parent * edge_weight * decay_factor`.
    pub decayed_score: f64,
    pub hops: u32,
    pub source_edge: Option<EdgeType>,
    pub edge_weight: Option<f64>,
    /// Node ids from the originating seed (or file) to this node, inclusive.
    pub path: Vec<String>,
}

impl ExpandedNode {
    /// Hop-0 entry for a seed.
    pub fn seed(seed: &Seed) -> Self {
        Self {
            path: vec![seed.learning.id.clone()],
            learning: seed.learning.clone(),
            decayed_score: seed.score,
            hops: 0,
            source_edge: None,
            edge_weight: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.learning.id
    }
}

/// Counters describing one `expand` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpansionStats {
    pub seed_count: usize,
    pub expanded_count: usize,
    /// Distinct nodes placed: seeds plus expanded.
    pub nodes_visited: usize,
    pub max_depth_reached: u32,
    /// True only when a node was dropped because of the node cap.
    pub max_nodes_reached: bool,
}

/// Output of `expand`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpansionResult {
    /// Seeds in input order.
    pub seeds: Vec<ExpandedNode>,
    /// Newly reached learnings, highest decayed score first.
    pub expanded: Vec<ExpandedNode>,
    /// `seeds` followed by `expanded`.
    pub all: Vec<ExpandedNode>,
    pub stats: ExpansionStats,
}

impl ExpansionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ids of expanded (non-seed) learnings, in result order.
    pub fn expanded_ids(&self) -> Vec<&str> {
        self.expanded.iter().map(|n| n.id()).collect()
    }
}

/// Counters describing one `expand_from_files` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FileExpansionStats {
    /// Distinct input paths.
    pub input_file_count: usize,
    pub anchored_count: usize,
    pub expanded_count: usize,
    /// Distinct files reached, input files included.
    pub files_visited: usize,
    pub max_depth_reached: u32,
    pub max_nodes_reached: bool,
}

/// Output of `expand_from_files`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FileExpansionResult {
    /// Learnings validly anchored to an input file (hop 0, `ANCHORED_TO`).
    pub anchored: Vec<ExpandedNode>,
    /// Learnings anchored to files reached over file-to-file edges.
    pub expanded: Vec<ExpandedNode>,
    pub all: Vec<ExpandedNode>,
    pub stats: FileExpansionStats,
}

impl FileExpansionResult {
    pub fn empty() -> Self {
        Self::default()
    }
}
