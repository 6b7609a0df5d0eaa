use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::edge_type::EdgeType;
use super::node::NodeRef;
use crate::constants::DEFAULT_EDGE_WEIGHT;

/// A directed, typed, weighted edge. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Edge {
    pub id: String,
    pub edge_type: EdgeType,
    pub source: NodeRef,
    pub target: NodeRef,
    /// Expected in (0, 1] but not enforced beyond being finite.
    pub weight: f64,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Edge {
    pub fn new(edge_type: EdgeType, source: NodeRef, target: NodeRef) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            edge_type,
            source,
            target,
            weight: DEFAULT_EDGE_WEIGHT,
            metadata: serde_json::Value::Object(Default::default()),
            created_at: Utc::now(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The node on the other end of this edge, seen from `from`.
    /// Self-loops return `from` itself.
    pub fn far_end(&self, from: &NodeRef) -> &NodeRef {
        if &self.source == from {
            &self.target
        } else {
            &self.source
        }
    }
}
