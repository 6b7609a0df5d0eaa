use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Typed relation carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    // Learning ↔ learning
    SimilarTo,
    DerivedFrom,
    Contradicts,
    LinksTo,
    Supersedes,
    // File ↔ file
    Imports,
    CoChangesWith,
    // Cross-entity
    AnchoredTo,
    UsedInRun,
    InvalidatedBy,
}

impl EdgeType {
    /// Total number of edge types.
    pub const COUNT: usize = 10;

    /// All variants for iteration.
    pub const ALL: [EdgeType; 10] = [
        Self::SimilarTo,
        Self::DerivedFrom,
        Self::Contradicts,
        Self::LinksTo,
        Self::Supersedes,
        Self::Imports,
        Self::CoChangesWith,
        Self::AnchoredTo,
        Self::UsedInRun,
        Self::InvalidatedBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimilarTo => "SIMILAR_TO",
            Self::DerivedFrom => "DERIVED_FROM",
            Self::Contradicts => "CONTRADICTS",
            Self::LinksTo => "LINKS_TO",
            Self::Supersedes => "SUPERSEDES",
            Self::Imports => "IMPORTS",
            Self::CoChangesWith => "CO_CHANGES_WITH",
            Self::AnchoredTo => "ANCHORED_TO",
            Self::UsedInRun => "USED_IN_RUN",
            Self::InvalidatedBy => "INVALIDATED_BY",
        }
    }

    /// Edge types that connect two files.
    pub fn is_file_relation(&self) -> bool {
        matches!(self, Self::Imports | Self::CoChangesWith)
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown edge type: {s}"))
    }
}
