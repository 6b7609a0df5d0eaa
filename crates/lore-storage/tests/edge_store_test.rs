//! Integration test: edge storage, directional lookup and filtering.

use lore_core::traits::{IEdgeStore, ILearningStore};
use lore_core::{Direction, Edge, EdgeFilter, EdgeType, ErrorKind, Learning, NodeRef};
use lore_storage::StorageEngine;

fn edge(t: EdgeType, from: &str, to: &str) -> Edge {
    Edge::new(t, NodeRef::learning(from), NodeRef::learning(to))
}

fn targets(edges: &[Edge]) -> Vec<String> {
    edges.iter().map(|e| e.target.id.clone()).collect()
}

#[test]
fn test_create_and_get_edge() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let e = edge(EdgeType::DerivedFrom, "A", "B")
        .with_weight(0.4)
        .with_metadata(serde_json::json!({"reason": "summarized"}));
    engine.create_edge(&e).unwrap();

    let got = engine.get_edge(&e.id).unwrap().unwrap();
    assert_eq!(got, e);
    assert_eq!(engine.edge_count().unwrap(), 1);
    assert!(engine.get_edge("missing").unwrap().is_none());
}

#[test]
fn test_non_finite_weight_is_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let err = engine
        .create_edge(&edge(EdgeType::SimilarTo, "A", "B").with_weight(f64::INFINITY))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(engine.edge_count().unwrap(), 0);
}

#[test]
fn test_out_of_range_weight_is_stored() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let e = edge(EdgeType::SimilarTo, "A", "B").with_weight(2.5);
    engine.create_edge(&e).unwrap();
    assert_eq!(engine.get_edge(&e.id).unwrap().unwrap().weight, 2.5);
}

#[test]
fn test_duplicate_edge_id_is_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let e = edge(EdgeType::SimilarTo, "A", "B");
    engine.create_edge(&e).unwrap();
    assert_eq!(engine.create_edge(&e).unwrap_err().kind(), ErrorKind::Store);
}

#[test]
fn test_directional_lookup_in_insertion_order() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.create_edge(&edge(EdgeType::SimilarTo, "A", "B")).unwrap();
    engine.create_edge(&edge(EdgeType::LinksTo, "A", "C")).unwrap();
    engine.create_edge(&edge(EdgeType::SimilarTo, "D", "A")).unwrap();

    let a = NodeRef::learning("A");
    let all = EdgeFilter::all();

    let out = engine.edges_from(&a, Direction::Outbound, &all).unwrap();
    assert_eq!(targets(&out), vec!["B", "C"]);

    let inbound = engine.edges_from(&a, Direction::Inbound, &all).unwrap();
    assert_eq!(inbound.len(), 1);
    assert_eq!(inbound[0].source.id, "D");

    let both = engine.edges_from(&a, Direction::Both, &all).unwrap();
    assert_eq!(both.len(), 3);
    assert_eq!(both[2].source.id, "D");
}

#[test]
fn test_filter_include_and_exclude() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.create_edge(&edge(EdgeType::SimilarTo, "A", "B")).unwrap();
    engine.create_edge(&edge(EdgeType::LinksTo, "A", "C")).unwrap();
    engine.create_edge(&edge(EdgeType::Contradicts, "A", "D")).unwrap();
    let a = NodeRef::learning("A");

    let only = EdgeFilter::only([EdgeType::SimilarTo, EdgeType::LinksTo]);
    assert_eq!(
        targets(&engine.edges_from(&a, Direction::Outbound, &only).unwrap()),
        vec!["B", "C"]
    );

    let excl = EdgeFilter::all().excluding([EdgeType::LinksTo]);
    assert_eq!(
        targets(&engine.edges_from(&a, Direction::Outbound, &excl).unwrap()),
        vec!["B", "D"]
    );

    let nothing = EdgeFilter::only(Vec::new());
    assert!(engine
        .edges_from(&a, Direction::Outbound, &nothing)
        .unwrap()
        .is_empty());
}

#[test]
fn test_node_kind_is_part_of_identity() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .create_edge(&Edge::new(
            EdgeType::Imports,
            NodeRef::file("src/a.rs"),
            NodeRef::file("src/b.rs"),
        ))
        .unwrap();

    let as_learning = NodeRef::learning("src/a.rs");
    assert!(engine
        .edges_from(&as_learning, Direction::Outbound, &EdgeFilter::all())
        .unwrap()
        .is_empty());
    let as_file = NodeRef::file("src/a.rs");
    assert_eq!(
        engine
            .edges_from(&as_file, Direction::Outbound, &EdgeFilter::all())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_removing_learning_drops_its_edges() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for id in ["A", "B", "C"] {
        engine.create(&Learning::new(format!("fact {id}")).with_id(id)).unwrap();
    }
    engine.create_edge(&edge(EdgeType::SimilarTo, "A", "B")).unwrap();
    engine.create_edge(&edge(EdgeType::SimilarTo, "C", "A")).unwrap();
    engine.create_edge(&edge(EdgeType::SimilarTo, "B", "C")).unwrap();

    engine.remove("A").unwrap();
    assert_eq!(engine.edge_count().unwrap(), 1);
}

#[test]
fn test_self_loop_is_stored() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.create_edge(&edge(EdgeType::LinksTo, "A", "A")).unwrap();
    let out = engine
        .edges_from(&NodeRef::learning("A"), Direction::Outbound, &EdgeFilter::all())
        .unwrap();
    assert_eq!(out.len(), 1);
    assert!(out[0].is_self_loop());
}
