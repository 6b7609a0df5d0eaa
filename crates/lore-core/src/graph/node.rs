use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The kind of entity a graph node refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Learning,
    File,
    Task,
    Run,
    Document,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        Self::Learning,
        Self::File,
        Self::Task,
        Self::Run,
        Self::Document,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::File => "file",
            Self::Task => "task",
            Self::Run => "run",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown node kind: {s}"))
    }
}

/// Identity of a graph node: a `(kind, id)` pair, so the graph can span
/// learnings, files and other entities without sharing an id space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NodeRef {
    pub kind: NodeKind,
    pub id: String,
}

impl NodeRef {
    pub fn new(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn learning(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Learning, id)
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(NodeKind::File, path)
    }

    pub fn is_learning(&self) -> bool {
        self.kind == NodeKind::Learning
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
