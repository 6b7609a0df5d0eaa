//! Integration tests for file-anchored expansion.

use lore_core::models::ExpandedNode;
use lore_core::traits::{IAnchorStore, ILearningStore};
use lore_core::{AnchorStatus, EdgeType};
use lore_graph::{EdgeTypeFilter, ExpansionEngine, ExpansionOptions};
use lore_storage::StorageEngine;
use test_fixtures::in_memory_graph;

fn engine(storage: &StorageEngine) -> ExpansionEngine<'_> {
    ExpansionEngine::new(storage, storage, storage)
}

fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

fn ids(nodes: &[ExpandedNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.id()).collect()
}

#[test]
fn anchored_then_expanded_over_file_edges() {
    let (storage, _) = in_memory_graph("files");
    let result = engine(&storage)
        .expand_from_files(&paths(&["src/main.rs"]), &ExpansionOptions::default())
        .unwrap();

    assert_eq!(ids(&result.anchored), vec!["LM"]);
    let lm = &result.anchored[0];
    assert_eq!(lm.hops, 0);
    assert_eq!(lm.decayed_score, 1.0);
    assert_eq!(lm.source_edge, Some(EdgeType::AnchoredTo));
    assert_eq!(lm.edge_weight, None);
    assert_eq!(lm.path, vec!["src/main.rs", "LM"]);

    assert_eq!(ids(&result.expanded), vec!["LC", "LC2", "LP"]);
    let lc = &result.expanded[0];
    assert_eq!(lc.hops, 1);
    assert!((lc.decayed_score - 0.7).abs() < 1e-9);
    assert_eq!(lc.source_edge, Some(EdgeType::Imports));
    assert_eq!(lc.path, vec!["src/main.rs", "src/config.rs", "LC"]);

    let lp = &result.expanded[2];
    assert_eq!(lp.hops, 2);
    assert!((lp.decayed_score - 0.7 * 0.5 * 0.7).abs() < 1e-9);
    assert_eq!(lp.source_edge, Some(EdgeType::CoChangesWith));
    assert_eq!(lp.edge_weight, Some(0.5));
    assert_eq!(
        lp.path,
        vec!["src/main.rs", "src/config.rs", "src/pool.rs", "LP"]
    );

    assert_eq!(result.stats.input_file_count, 1);
    assert_eq!(result.stats.anchored_count, 1);
    assert_eq!(result.stats.expanded_count, 3);
    assert_eq!(result.stats.files_visited, 3);
    assert_eq!(result.stats.max_depth_reached, 2);
    assert!(!result.stats.max_nodes_reached);
    assert_eq!(ids(&result.all), vec!["LM", "LC", "LC2", "LP"]);
}

#[test]
fn only_valid_anchors_of_active_learnings_count() {
    let (storage, _) = in_memory_graph("files");
    let result = engine(&storage)
        .expand_from_files(&paths(&["src/pool.rs"]), &ExpansionOptions::default().with_depth(0))
        .unwrap();
    // LX is inactive; LM's anchor on pool.rs has drifted.
    assert_eq!(ids(&result.anchored), vec!["LP"]);
}

#[test]
fn invalidated_anchor_stops_seeding() {
    let (storage, _) = in_memory_graph("files");
    let anchor_id = storage.anchors_for_learning("LM").unwrap()[0].id.clone();
    storage
        .update_anchor_status(&anchor_id, AnchorStatus::Invalid, Some("file rewritten"))
        .unwrap();
    let result = engine(&storage)
        .expand_from_files(&paths(&["src/main.rs"]), &ExpansionOptions::default().with_depth(0))
        .unwrap();
    assert!(result.anchored.is_empty());
}

#[test]
fn depth_zero_keeps_only_anchored() {
    let (storage, _) = in_memory_graph("files");
    let result = engine(&storage)
        .expand_from_files(&paths(&["src/main.rs"]), &ExpansionOptions::default().with_depth(0))
        .unwrap();
    assert_eq!(ids(&result.anchored), vec!["LM"]);
    assert!(result.expanded.is_empty());
    assert_eq!(result.stats.files_visited, 1);
}

#[test]
fn empty_and_blank_paths_return_empty_result() {
    let (storage, _) = in_memory_graph("files");
    let e = engine(&storage);
    assert!(e
        .expand_from_files(&[], &ExpansionOptions::default())
        .unwrap()
        .all
        .is_empty());
    let result = e
        .expand_from_files(&paths(&["", "   "]), &ExpansionOptions::default())
        .unwrap();
    assert!(result.all.is_empty());
    assert_eq!(result.stats.input_file_count, 0);
}

#[test]
fn duplicate_input_paths_are_deduplicated() {
    let (storage, _) = in_memory_graph("files");
    let result = engine(&storage)
        .expand_from_files(
            &paths(&["src/main.rs", "src/main.rs"]),
            &ExpansionOptions::default().with_depth(0),
        )
        .unwrap();
    assert_eq!(result.stats.input_file_count, 1);
    assert_eq!(ids(&result.anchored), vec!["LM"]);
}

#[test]
fn input_files_are_not_revisited() {
    let (storage, _) = in_memory_graph("files");
    let result = engine(&storage)
        .expand_from_files(
            &paths(&["src/main.rs", "src/config.rs"]),
            &ExpansionOptions::default(),
        )
        .unwrap();
    assert_eq!(ids(&result.anchored), vec!["LM", "LC", "LC2"]);
    assert_eq!(ids(&result.expanded), vec!["LP"]);
    assert_eq!(result.expanded[0].hops, 1);
    assert!((result.expanded[0].decayed_score - 0.35).abs() < 1e-9);
}

#[test]
fn max_nodes_caps_anchored_plus_expanded() {
    let (storage, _) = in_memory_graph("files");
    let result = engine(&storage)
        .expand_from_files(
            &paths(&["src/main.rs"]),
            &ExpansionOptions::default().with_max_nodes(2),
        )
        .unwrap();
    assert_eq!(result.all.len(), 2);
    assert_eq!(ids(&result.expanded), vec!["LC"]);
    assert!(result.stats.max_nodes_reached);
    assert_eq!(result.stats.max_depth_reached, 1);
}

#[test]
fn file_reached_after_cap_does_not_count_toward_depth() {
    let (storage, _) = in_memory_graph("files");
    let result = engine(&storage)
        .expand_from_files(
            &paths(&["src/config.rs"]),
            &ExpansionOptions::default().with_max_nodes(2),
        )
        .unwrap();
    assert_eq!(ids(&result.anchored), vec!["LC", "LC2"]);
    assert!(result.expanded.is_empty());
    assert!(result.stats.max_nodes_reached);
    assert_eq!(result.stats.max_depth_reached, 0);
}

#[test]
fn edge_type_filter_applies_to_file_edges() {
    let (storage, _) = in_memory_graph("files");
    let opts = ExpansionOptions::default()
        .with_edge_types(EdgeTypeFilter::only([EdgeType::Imports]));
    let result = engine(&storage)
        .expand_from_files(&paths(&["src/main.rs"]), &opts)
        .unwrap();
    assert_eq!(ids(&result.expanded), vec!["LC", "LC2"]);
    assert_eq!(result.stats.files_visited, 2);
    assert_eq!(result.stats.max_depth_reached, 1);
}

#[test]
fn learning_anchored_to_several_reached_files_appears_once() {
    let (storage, _) = in_memory_graph("files");
    storage
        .create_anchor(&lore_core::Anchor::new("LC", "src/pool.rs"))
        .unwrap();
    let result = engine(&storage)
        .expand_from_files(&paths(&["src/main.rs"]), &ExpansionOptions::default())
        .unwrap();
    assert_eq!(result.all.iter().filter(|n| n.id() == "LC").count(), 1);
    assert_eq!(result.expanded.iter().find(|n| n.id() == "LC").unwrap().hops, 1);
}

#[test]
fn reactivated_learning_is_placed() {
    let (storage, _) = in_memory_graph("files");
    storage.set_active("LX", true).unwrap();
    let result = engine(&storage)
        .expand_from_files(&paths(&["src/pool.rs"]), &ExpansionOptions::default().with_depth(0))
        .unwrap();
    assert_eq!(ids(&result.anchored), vec!["LP", "LX"]);
}
