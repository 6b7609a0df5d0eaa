//! Seed-based expansion: level-synchronous BFS over learning-to-learning edges.

use std::collections::HashSet;
use std::time::Instant;

use lore_core::errors::{LoreResult, ValidationError};
use lore_core::models::{ExpandedNode, ExpansionResult, ExpansionStats, Seed};
use lore_core::traits::{IAnchorStore, IEdgeStore, ILearningStore};
use lore_core::{Direction, Edge, Learning, NodeRef};
use tracing::{debug, info_span};

use crate::options::ExpansionOptions;

/// Graph expansion over borrowed stores. Holds no state between calls.
pub struct ExpansionEngine<'a> {
    pub(crate) learnings: &'a dyn ILearningStore,
    pub(crate) edges: &'a dyn IEdgeStore,
    pub(crate) anchors: &'a dyn IAnchorStore,
}

impl<'a> ExpansionEngine<'a> {
    pub fn new(
        learnings: &'a dyn ILearningStore,
        edges: &'a dyn IEdgeStore,
        anchors: &'a dyn IAnchorStore,
    ) -> Self {
        Self {
            learnings,
            edges,
            anchors,
        }
    }

    /// Expand from `seeds` following `options`.
    ///
    /// Seeds are re-read from the store; missing, inactive or deleted seeds are
    /// dropped. Seeds keep their input order (duplicates collapse to the first). Every
    /// reachable active learning is placed at most once, at the first path that
    /// reaches it, with `decayed_score = parent * weight * decay_factor`.
    /// Reaching `max_nodes` stops the whole call. No seeds means an empty
    /// result whatever the options.
    pub fn expand(&self, seeds: &[Seed], options: &ExpansionOptions) -> LoreResult<ExpansionResult> {
        if seeds.is_empty() {
            return Ok(ExpansionResult::empty());
        }
        options.validate()?;
        for seed in seeds {
            if !seed.score.is_finite() {
                return Err(ValidationError::InvalidScore {
                    field: "seed score",
                    value: seed.score,
                }
                .into());
            }
        }

        let _span = info_span!("expand", seeds = seeds.len(), depth = options.depth).entered();
        let start = Instant::now();

        let mut visited: HashSet<NodeRef> = HashSet::new();
        // Nodes already found missing or inactive this call.
        let mut rejected: HashSet<NodeRef> = HashSet::new();
        let mut placed_seeds: Vec<ExpandedNode> = Vec::with_capacity(seeds.len());
        let mut max_nodes_reached = false;
        for seed in seeds {
            let node = NodeRef::learning(&seed.learning.id);
            if visited.contains(&node) || rejected.contains(&node) {
                continue;
            }
            let Some(learning) = self.retrievable(&node)? else {
                debug!(id = %seed.learning.id, "seed missing or inactive, skipped");
                rejected.insert(node);
                continue;
            };
            if placed_seeds.len() >= options.max_nodes {
                max_nodes_reached = true;
                break;
            }
            visited.insert(node);
            placed_seeds.push(ExpandedNode::seed(&Seed::new(learning, seed.score)));
        }

        let mut expanded: Vec<ExpandedNode> = Vec::new();
        let mut max_depth_reached = 0u32;
        let mut frontier: Vec<ExpandedNode> = placed_seeds.clone();

        'hops: for hop in 1..=options.depth {
            if frontier.is_empty() || max_nodes_reached {
                break;
            }
            let filter = options.edge_types.effective(hop);
            let mut next = Vec::new();

            for parent in &frontier {
                let origin = NodeRef::learning(parent.id());
                for pass in options.direction.passes() {
                    for edge in self.edges.edges_from(&origin, *pass, &filter)? {
                        let far = far_node(&edge, *pass);
                        if !far.is_learning() || visited.contains(far) || rejected.contains(far) {
                            continue;
                        }
                        let Some(learning) = self.retrievable(far)? else {
                            rejected.insert(far.clone());
                            continue;
                        };
                        if placed_seeds.len() + expanded.len() >= options.max_nodes {
                            max_nodes_reached = true;
                            break 'hops;
                        }
                        visited.insert(far.clone());

                        let node = reached(parent, learning, &edge, hop, options.decay_factor);
                        max_depth_reached = hop;
                        next.push(node.clone());
                        expanded.push(node);
                    }
                }
            }
            frontier = next;
        }

        sort_by_score(&mut expanded);

        let stats = ExpansionStats {
            seed_count: placed_seeds.len(),
            expanded_count: expanded.len(),
            nodes_visited: placed_seeds.len() + expanded.len(),
            max_depth_reached,
            max_nodes_reached,
        };
        debug!(
            seed_count = stats.seed_count,
            expanded_count = stats.expanded_count,
            max_depth_reached = stats.max_depth_reached,
            max_nodes_reached = stats.max_nodes_reached,
            elapsed_us = start.elapsed().as_micros() as u64,
            "expansion complete"
        );

        let mut all = placed_seeds.clone();
        all.extend(expanded.iter().cloned());
        Ok(ExpansionResult {
            seeds: placed_seeds,
            expanded,
            all,
            stats,
        })
    }

    /// The learning behind `node`, if it exists and may be traversed.
    pub(crate) fn retrievable(&self, node: &NodeRef) -> LoreResult<Option<Learning>> {
        Ok(self
            .learnings
            .get(&node.id)?
            .filter(Learning::is_retrievable))
    }
}

/// The end of `edge` a traversal in `pass` direction arrives at.
pub(crate) fn far_node(edge: &Edge, pass: Direction) -> &NodeRef {
    match pass {
        Direction::Inbound => &edge.source,
        _ => &edge.target,
    }
}

fn reached(parent: &ExpandedNode, learning: Learning, edge: &Edge, hop: u32, decay: f64) -> ExpandedNode {
    let mut path = parent.path.clone();
    path.push(learning.id.clone());
    ExpandedNode {
        learning,
        decayed_score: parent.decayed_score * edge.weight * decay,
        hops: hop,
        source_edge: Some(edge.edge_type),
        edge_weight: Some(edge.weight),
        path,
    }
}

/// Stable sort, highest score first.
pub(crate) fn sort_by_score(nodes: &mut [ExpandedNode]) {
    nodes.sort_by(|a, b| {
        b.decayed_score
            .partial_cmp(&a.decayed_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
