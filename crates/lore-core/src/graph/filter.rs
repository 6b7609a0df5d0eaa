use serde::{Deserialize, Serialize};

use super::edge_type::EdgeType;

/// A resolved edge-type filter as understood by edge stores.
///
/// `include: None` admits every type; `exclude` is applied after `include`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFilter {
    pub include: Option<Vec<EdgeType>>,
    pub exclude: Vec<EdgeType>,
}

impl EdgeFilter {
    /// Admit every edge type.
    pub fn all() -> Self {
        Self::default()
    }

    /// Admit only the listed edge types.
    pub fn only(types: impl IntoIterator<Item = EdgeType>) -> Self {
        Self {
            include: Some(types.into_iter().collect()),
            exclude: Vec::new(),
        }
    }

    pub fn excluding(mut self, types: impl IntoIterator<Item = EdgeType>) -> Self {
        self.exclude.extend(types);
        self
    }

    pub fn allows(&self, edge_type: EdgeType) -> bool {
        if let Some(include) = &self.include {
            if !include.contains(&edge_type) {
                return false;
            }
        }
        !self.exclude.contains(&edge_type)
    }

    /// True when no type could pass, so a store query can be skipped.
    pub fn is_empty(&self) -> bool {
        match &self.include {
            Some(include) => include.iter().all(|t| self.exclude.contains(t)),
            None => EdgeType::ALL.iter().all(|t| self.exclude.contains(t)),
        }
    }
}
