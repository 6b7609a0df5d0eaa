//! Property tests for lore-graph: node cap, uniqueness, depth and decay bounds.

use std::collections::HashSet;

use proptest::prelude::*;

use lore_core::models::Seed;
use lore_core::traits::{IEdgeStore, ILearningStore};
use lore_core::{Direction, Edge, EdgeType, Learning, NodeRef};
use lore_graph::{ExpansionEngine, ExpansionOptions};
use lore_storage::StorageEngine;

const NODES: usize = 12;

/// Random directed graph over `NODES` learnings, self-loops and parallel edges allowed.
fn build_graph(edges: &[(usize, usize, f64)], inactive: &[usize]) -> StorageEngine {
    let storage = StorageEngine::open_in_memory().unwrap();
    for i in 0..NODES {
        let mut learning = Learning::new(format!("learning {i}")).with_id(format!("n{i}"));
        learning.active = !inactive.contains(&i);
        storage.create(&learning).unwrap();
    }
    for &(src, tgt, weight) in edges {
        let edge = Edge::new(
            EdgeType::SimilarTo,
            NodeRef::learning(format!("n{src}")),
            NodeRef::learning(format!("n{tgt}")),
        )
        .with_weight(weight);
        storage.create_edge(&edge).unwrap();
    }
    storage
}

fn edge_strategy() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0..NODES, 0..NODES, 0.05_f64..1.0_f64), 0..NODES * 3)
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Outbound),
        Just(Direction::Inbound),
        Just(Direction::Both),
    ]
}

fn seeds_for(storage: &StorageEngine, ids: &[usize]) -> Vec<Seed> {
    ids.iter()
        .map(|i| Seed::new(storage.get(&format!("n{i}")).unwrap().unwrap(), 1.0))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_node_cap_and_uniqueness(
        edges in edge_strategy(),
        seed_ids in prop::collection::vec(0..NODES, 1..4),
        depth in 0_u32..6,
        max_nodes in 1_usize..10,
        direction in direction_strategy(),
    ) {
        let storage = build_graph(&edges, &[]);
        let engine = ExpansionEngine::new(&storage, &storage, &storage);
        let seeds = seeds_for(&storage, &seed_ids);
        let opts = ExpansionOptions::default()
            .with_depth(depth)
            .with_max_nodes(max_nodes)
            .with_direction(direction);

        let capped = engine.expand(&seeds, &opts).unwrap();
        prop_assert!(capped.all.len() <= max_nodes);
        prop_assert_eq!(capped.stats.nodes_visited, capped.all.len());

        let unique: HashSet<&str> = capped.all.iter().map(|n| n.id()).collect();
        prop_assert_eq!(unique.len(), capped.all.len());

        let uncapped = engine
            .expand(&seeds, &opts.clone().with_max_nodes(NODES + 1))
            .unwrap();
        prop_assert!(!uncapped.stats.max_nodes_reached);
        if capped.stats.max_nodes_reached {
            prop_assert!(capped.all.len() < uncapped.all.len());
        } else {
            prop_assert_eq!(capped.all.len(), uncapped.all.len());
        }
    }

    #[test]
    fn prop_hops_paths_and_scores(
        edges in edge_strategy(),
        seed_id in 0..NODES,
        depth in 1_u32..6,
        decay in 0.1_f64..1.0,
    ) {
        let storage = build_graph(&edges, &[]);
        let engine = ExpansionEngine::new(&storage, &storage, &storage);
        let opts = ExpansionOptions::default().with_depth(depth).with_decay(decay);
        let result = engine.expand(&seeds_for(&storage, &[seed_id]), &opts).unwrap();
        let seed_name = format!("n{seed_id}");

        for node in &result.expanded {
            prop_assert!(node.hops >= 1 && node.hops <= depth);
            prop_assert_eq!(node.path.len(), node.hops as usize + 1);
            prop_assert_eq!(node.path.first().map(String::as_str), Some(seed_name.as_str()));
            prop_assert_eq!(node.path.last().map(String::as_str), Some(node.id()));
            prop_assert!(node.decayed_score > 0.0 && node.decayed_score <= decay.powi(node.hops as i32) + 1e-12);
            prop_assert!(node.hops <= result.stats.max_depth_reached);
        }
        for pair in result.expanded.windows(2) {
            prop_assert!(pair[0].decayed_score >= pair[1].decayed_score);
        }
    }

    #[test]
    fn prop_inactive_nodes_never_appear(
        edges in edge_strategy(),
        inactive in prop::collection::vec(1..NODES, 0..4),
        depth in 1_u32..6,
    ) {
        let storage = build_graph(&edges, &inactive);
        let engine = ExpansionEngine::new(&storage, &storage, &storage);
        let opts = ExpansionOptions::default().with_depth(depth).with_direction(Direction::Both);
        let result = engine.expand(&seeds_for(&storage, &[0]), &opts).unwrap();

        for node in &result.expanded {
            prop_assert!(node.learning.active);
            for id in &node.path {
                let index: usize = id[1..].parse().unwrap();
                prop_assert!(!inactive.contains(&index));
            }
        }
    }
}
