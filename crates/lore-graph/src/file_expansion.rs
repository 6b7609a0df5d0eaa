//! File-anchored expansion: learnings anchored to the input files, then
//! learnings anchored to files reached over file-to-file edges.

use std::collections::HashSet;

use lore_core::constants::ANCHORED_SEED_SCORE;
use lore_core::errors::LoreResult;
use lore_core::models::{ExpandedNode, FileExpansionResult, FileExpansionStats};
use lore_core::{EdgeType, NodeKind, NodeRef};
use tracing::{debug, info_span};

use crate::engine::{far_node, sort_by_score, ExpansionEngine};
use crate::options::ExpansionOptions;

/// A file on the traversal frontier.
struct FileStep {
    path: String,
    score: f64,
    /// File paths from the input file to this one, inclusive.
    chain: Vec<String>,
}

/// Learnings placed so far, shared by the anchored and expanded phases.
struct Placement {
    learning_ids: HashSet<String>,
    max_nodes: usize,
    count: usize,
    truncated: bool,
}

impl Placement {
    fn is_full(&self) -> bool {
        self.count >= self.max_nodes
    }
}

impl ExpansionEngine<'_> {
    /// Expand from file paths.
    ///
    /// Hop 0 holds every retrievable learning with a valid anchor to an input
    /// path. Later hops walk file-to-file edges; each newly reached file's
    /// anchored learnings are placed with the file's decayed score.
    pub fn expand_from_files(
        &self,
        paths: &[String],
        options: &ExpansionOptions,
    ) -> LoreResult<FileExpansionResult> {
        options.validate()?;

        let mut inputs: Vec<String> = Vec::new();
        for path in paths {
            let path = path.trim();
            if !path.is_empty() && !inputs.iter().any(|p| p == path) {
                inputs.push(path.to_string());
            }
        }
        if inputs.is_empty() {
            return Ok(FileExpansionResult::empty());
        }

        let _span = info_span!("expand_from_files", files = inputs.len(), depth = options.depth).entered();

        let mut placement = Placement {
            learning_ids: HashSet::new(),
            max_nodes: options.max_nodes,
            count: 0,
            truncated: false,
        };

        let mut anchored = Vec::new();
        for path in &inputs {
            let chain = vec![path.clone()];
            let nodes = self.anchored_learnings(path, &chain, 0, ANCHORED_SEED_SCORE, None, &mut placement)?;
            anchored.extend(nodes);
            if placement.truncated {
                break;
            }
        }

        let mut files_visited: HashSet<String> = inputs.iter().cloned().collect();
        let mut expanded = Vec::new();
        let mut max_depth_reached = 0u32;
        let mut frontier: Vec<FileStep> = inputs
            .iter()
            .map(|p| FileStep {
                path: p.clone(),
                score: ANCHORED_SEED_SCORE,
                chain: vec![p.clone()],
            })
            .collect();

        'hops: for hop in 1..=options.depth {
            if frontier.is_empty() || placement.truncated {
                break;
            }
            let filter = options.edge_types.effective(hop);
            let mut next = Vec::new();

            for parent in &frontier {
                let origin = NodeRef::file(&parent.path);
                for pass in options.direction.passes() {
                    for edge in self.edges.edges_from(&origin, *pass, &filter)? {
                        let far = far_node(&edge, *pass);
                        if far.kind != NodeKind::File || !files_visited.insert(far.id.clone()) {
                            continue;
                        }
                        let score = parent.score * edge.weight * options.decay_factor;
                        let mut chain = parent.chain.clone();
                        chain.push(far.id.clone());

                        let nodes = self.anchored_learnings(
                            &far.id,
                            &chain,
                            hop,
                            score,
                            Some((edge.edge_type, edge.weight)),
                            &mut placement,
                        )?;
                        let placed_any = !nodes.is_empty();
                        expanded.extend(nodes);
                        if placement.truncated {
                            if placed_any {
                                max_depth_reached = hop;
                            }
                            break 'hops;
                        }
                        max_depth_reached = hop;
                        next.push(FileStep {
                            path: far.id.clone(),
                            score,
                            chain,
                        });
                    }
                }
            }
            frontier = next;
        }

        sort_by_score(&mut expanded);

        let stats = FileExpansionStats {
            input_file_count: inputs.len(),
            anchored_count: anchored.len(),
            expanded_count: expanded.len(),
            files_visited: files_visited.len(),
            max_depth_reached,
            max_nodes_reached: placement.truncated,
        };
        debug!(
            input_files = stats.input_file_count,
            anchored = stats.anchored_count,
            expanded = stats.expanded_count,
            files_visited = stats.files_visited,
            "file expansion complete"
        );

        let mut all = anchored.clone();
        all.extend(expanded.iter().cloned());
        Ok(FileExpansionResult {
            anchored,
            expanded,
            all,
            stats,
        })
    }

    /// Place the not-yet-placed retrievable learnings validly anchored to `path`.
    fn anchored_learnings(
        &self,
        path: &str,
        chain: &[String],
        hop: u32,
        score: f64,
        via: Option<(EdgeType, f64)>,
        placement: &mut Placement,
    ) -> LoreResult<Vec<ExpandedNode>> {
        let mut out = Vec::new();
        for anchor in self.anchors.valid_anchors_for_file(path)? {
            if placement.learning_ids.contains(&anchor.learning_id) {
                continue;
            }
            let Some(learning) = self.retrievable(&NodeRef::learning(&anchor.learning_id))? else {
                continue;
            };
            if placement.is_full() {
                placement.truncated = true;
                break;
            }
            placement.learning_ids.insert(learning.id.clone());
            placement.count += 1;

            let mut node_path = chain.to_vec();
            node_path.push(learning.id.clone());
            out.push(ExpandedNode {
                learning,
                decayed_score: score,
                hops: hop,
                source_edge: Some(via.map_or(EdgeType::AnchoredTo, |(t, _)| t)),
                edge_weight: via.map(|(_, w)| w),
                path: node_path,
            });
        }
        Ok(out)
    }
}
