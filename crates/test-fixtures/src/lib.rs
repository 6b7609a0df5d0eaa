//! Test fixture loader for Lore graph scenarios.
//!
//! Graph fixtures live in `graphs/*.json`. Each one lists learnings, edges and
//! anchors; [`load_graph`] deserializes a fixture and [`seed_graph`] writes it
//! into any set of stores. [`in_memory_graph`] does both against a fresh
//! in-memory [`StorageEngine`].

use std::path::PathBuf;

use chrono::{Duration, Utc};
use lore_core::models::Seed;
use lore_core::traits::{IAnchorStore, IEdgeStore, ILearningStore};
use lore_core::{Anchor, AnchorStatus, Edge, EdgeType, Learning, NodeKind, NodeRef};
use lore_storage::StorageEngine;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("graphs")
}

/// Load and deserialize a JSON fixture file relative to the fixtures root.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Names of every graph fixture, sorted.
pub fn list_graphs() -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(fixtures_root())
        .unwrap_or_else(|e| panic!("Failed to read fixtures directory: {e}"))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path.file_stem()?.to_string_lossy().into_owned())
            } else {
                None
            }
        })
        .collect();
    names.sort();
    names
}

// =============================================================================
// Graph fixture schema
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GraphFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub learnings: Vec<LearningSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default)]
    pub anchors: Vec<AnchorSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LearningSpec {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub outcome_score: Option<f64>,
    /// Age of the record in days.
    #[serde(default)]
    pub age_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeSpec {
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Kind of both endpoints.
    #[serde(default = "default_kind")]
    pub kind: NodeKind,
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnchorSpec {
    pub learning_id: String,
    pub file_path: String,
    #[serde(default)]
    pub status: AnchorStatus,
}

fn default_true() -> bool {
    true
}

fn default_kind() -> NodeKind {
    NodeKind::Learning
}

fn default_weight() -> f64 {
    1.0
}

impl LearningSpec {
    pub fn to_learning(&self) -> Learning {
        let mut learning = Learning::new(&self.content).with_id(&self.id);
        learning.category = self.category.clone();
        learning.active = self.active;
        learning.outcome_score = self.outcome_score;
        if self.age_days > 0 {
            let at = Utc::now() - Duration::days(self.age_days);
            learning.created_at = at;
            learning.updated_at = at;
        }
        learning
    }
}

impl EdgeSpec {
    pub fn to_edge(&self) -> Edge {
        Edge::new(
            self.edge_type,
            NodeRef::new(self.kind, &self.source),
            NodeRef::new(self.kind, &self.target),
        )
        .with_weight(self.weight)
    }
}

impl GraphFixture {
    pub fn learning(&self, id: &str) -> Learning {
        self.learnings
            .iter()
            .find(|l| l.id == id)
            .unwrap_or_else(|| panic!("fixture {} has no learning {id}", self.name))
            .to_learning()
    }
}

/// Load `graphs/<name>.json`.
pub fn load_graph(name: &str) -> GraphFixture {
    load_fixture(&format!("{name}.json"))
}

/// Write every learning, edge and anchor of `fixture` into the stores.
///
/// # Panics
/// Panics if any store rejects a record.
pub fn seed_graph(
    fixture: &GraphFixture,
    learnings: &dyn ILearningStore,
    edges: &dyn IEdgeStore,
    anchors: &dyn IAnchorStore,
) {
    for spec in &fixture.learnings {
        learnings
            .create(&spec.to_learning())
            .unwrap_or_else(|e| panic!("fixture {}: learning {}: {e}", fixture.name, spec.id));
    }
    for spec in &fixture.edges {
        edges.create_edge(&spec.to_edge()).unwrap_or_else(|e| {
            panic!("fixture {}: edge {} -> {}: {e}", fixture.name, spec.source, spec.target)
        });
    }
    for spec in &fixture.anchors {
        let anchor = Anchor::new(&spec.learning_id, &spec.file_path).with_status(spec.status);
        anchors.create_anchor(&anchor).unwrap_or_else(|e| {
            panic!("fixture {}: anchor {}: {e}", fixture.name, spec.learning_id)
        });
    }
}

/// A fresh in-memory store holding the named fixture.
pub fn in_memory_graph(name: &str) -> (StorageEngine, GraphFixture) {
    let storage = StorageEngine::open_in_memory()
        .unwrap_or_else(|e| panic!("Failed to open in-memory storage: {e}"));
    let fixture = load_graph(name);
    seed_graph(&fixture, &storage, &storage, &storage);
    (storage, fixture)
}

/// Seed for an expansion call, read back from the store.
pub fn seed(store: &dyn ILearningStore, id: &str, score: f64) -> Seed {
    let learning = store
        .get(id)
        .unwrap_or_else(|e| panic!("Failed to read learning {id}: {e}"))
        .unwrap_or_else(|| panic!("learning {id} not in store"));
    Seed::new(learning, score)
}
