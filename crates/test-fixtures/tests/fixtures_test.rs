//! Every graph fixture parses and seeds cleanly into a fresh store.

use lore_core::traits::{IEdgeStore, ILearningStore};
use test_fixtures::{fixture_exists, in_memory_graph, list_graphs, load_graph};

#[test]
fn all_graphs_are_listed() {
    let names = list_graphs();
    for expected in ["chain", "cycle", "diamond", "files", "star"] {
        assert!(names.iter().any(|n| n == expected), "missing fixture {expected}");
        assert!(fixture_exists(&format!("{expected}.json")));
    }
}

#[test]
fn every_graph_seeds_into_storage() {
    for name in list_graphs() {
        let (storage, fixture) = in_memory_graph(&name);
        assert_eq!(fixture.name, name);
        assert_eq!(storage.list().unwrap().len(), fixture.learnings.len());
        assert_eq!(storage.edge_count().unwrap(), fixture.edges.len());
    }
}

#[test]
fn inactive_flag_is_carried() {
    let fixture = load_graph("files");
    assert!(!fixture.learning("LX").active);
    assert!(fixture.learning("LM").active);
}
