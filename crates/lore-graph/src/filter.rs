//! Edge-type filtering for expansion, with optional per-hop overrides.

use std::collections::BTreeMap;

use lore_core::errors::ValidationError;
use lore_core::{EdgeFilter, EdgeType};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Include/exclude lists applied at a single hop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopFilter {
    /// `None` or an empty list admits every type.
    #[serde(default)]
    pub include: Option<Vec<EdgeType>>,
    #[serde(default)]
    pub exclude: Vec<EdgeType>,
}

impl HopFilter {
    pub fn include(types: impl IntoIterator<Item = EdgeType>) -> Self {
        Self {
            include: Some(types.into_iter().collect()),
            exclude: Vec::new(),
        }
    }

    pub fn exclude(types: impl IntoIterator<Item = EdgeType>) -> Self {
        Self {
            include: None,
            exclude: types.into_iter().collect(),
        }
    }

    fn validate(&self, scope: &str) -> Result<(), ValidationError> {
        if let Some(include) = &self.include {
            if let Some(t) = include.iter().find(|t| self.exclude.contains(t)) {
                return Err(ValidationError::ConflictingFilters {
                    edge_type: *t,
                    scope: scope.to_string(),
                });
            }
        }
        Ok(())
    }

    fn resolve(&self) -> EdgeFilter {
        EdgeFilter {
            include: normalize_include(self.include.as_deref()),
            exclude: self.exclude.clone(),
        }
    }
}

/// Which edge types an expansion may follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum EdgeTypeFilter {
    /// Follow every edge type.
    #[default]
    Any,
    /// Follow only the listed types, at every hop.
    Only { types: Vec<EdgeType> },
    /// Top-level include/exclude, replaced wholesale at the hops named in `per_hop`.
    Rules {
        #[serde(default)]
        include: Option<Vec<EdgeType>>,
        #[serde(default)]
        exclude: Vec<EdgeType>,
        #[serde(default, deserialize_with = "hop_keys")]
        per_hop: BTreeMap<u32, HopFilter>,
    },
}

impl EdgeTypeFilter {
    pub fn only(types: impl IntoIterator<Item = EdgeType>) -> Self {
        Self::Only {
            types: types.into_iter().collect(),
        }
    }

    pub fn rules(top_level: HopFilter) -> Self {
        Self::Rules {
            include: top_level.include,
            exclude: top_level.exclude,
            per_hop: BTreeMap::new(),
        }
    }

    /// Override the filter used at `hop` (1-based). Turns `Any`/`Only` into `Rules`.
    pub fn with_hop(self, hop: u32, filter: HopFilter) -> Self {
        let (include, exclude, mut per_hop) = match self {
            Self::Any => (None, Vec::new(), BTreeMap::new()),
            Self::Only { types } => (Some(types), Vec::new(), BTreeMap::new()),
            Self::Rules {
                include,
                exclude,
                per_hop,
            } => (include, exclude, per_hop),
        };
        per_hop.insert(hop, filter);
        Self::Rules {
            include,
            exclude,
            per_hop,
        }
    }

    /// Reject per-hop keys below 1 and any type both included and excluded at
    /// the same scope.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let Self::Rules {
            include,
            exclude,
            per_hop,
        } = self
        else {
            return Ok(());
        };
        HopFilter {
            include: include.clone(),
            exclude: exclude.clone(),
        }
        .validate("top-level")?;
        for (hop, filter) in per_hop {
            if *hop == 0 {
                return Err(ValidationError::InvalidHop { hop: *hop });
            }
            filter.validate(&format!("hop {hop}"))?;
        }
        Ok(())
    }

    /// The filter in force at `hop`: the per-hop override if present, else the
    /// top-level lists.
    pub fn effective(&self, hop: u32) -> EdgeFilter {
        match self {
            Self::Any => EdgeFilter::all(),
            Self::Only { types } => EdgeFilter {
                include: normalize_include(Some(types)),
                exclude: Vec::new(),
            },
            Self::Rules {
                include,
                exclude,
                per_hop,
            } => match per_hop.get(&hop) {
                Some(filter) => filter.resolve(),
                None => EdgeFilter {
                    include: normalize_include(include.as_deref()),
                    exclude: exclude.clone(),
                },
            },
        }
    }
}

// Tagged enum content is buffered, so map keys arrive as strings.
fn hop_keys<'de, D>(deserializer: D) -> Result<BTreeMap<u32, HopFilter>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, HopFilter>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, filter)| {
            key.trim()
                .parse::<u32>()
                .map(|hop| (hop, filter))
                .map_err(|_| D::Error::custom(format!("invalid hop key `{key}`")))
        })
        .collect()
}

// An empty include list places no restriction.
fn normalize_include(include: Option<&[EdgeType]>) -> Option<Vec<EdgeType>> {
    match include {
        Some(types) if !types.is_empty() => Some(types.to_vec()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_admits_everything_at_every_hop() {
        let f = EdgeTypeFilter::Any;
        for hop in 1..=5 {
            assert_eq!(f.effective(hop), EdgeFilter::all());
        }
    }

    #[test]
    fn only_with_empty_list_is_unrestricted() {
        let f = EdgeTypeFilter::only(Vec::new());
        assert_eq!(f.effective(1), EdgeFilter::all());
    }

    #[test]
    fn per_hop_replaces_top_level_only_at_its_hop() {
        let f = EdgeTypeFilter::rules(HopFilter::include([EdgeType::SimilarTo]))
            .with_hop(2, HopFilter::include([EdgeType::DerivedFrom]));

        assert!(f.effective(1).allows(EdgeType::SimilarTo));
        assert!(!f.effective(1).allows(EdgeType::DerivedFrom));
        assert!(f.effective(2).allows(EdgeType::DerivedFrom));
        assert!(!f.effective(2).allows(EdgeType::SimilarTo));
        assert!(f.effective(3).allows(EdgeType::SimilarTo));
    }

    #[test]
    fn overlap_at_top_level_is_rejected() {
        let f = EdgeTypeFilter::Rules {
            include: Some(vec![EdgeType::LinksTo]),
            exclude: vec![EdgeType::LinksTo],
            per_hop: BTreeMap::new(),
        };
        assert_eq!(
            f.validate(),
            Err(ValidationError::ConflictingFilters {
                edge_type: EdgeType::LinksTo,
                scope: "top-level".to_string(),
            })
        );
    }

    #[test]
    fn overlap_across_scopes_is_allowed() {
        let f = EdgeTypeFilter::rules(HopFilter::exclude([EdgeType::Contradicts]))
            .with_hop(1, HopFilter::include([EdgeType::Contradicts]));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn hop_zero_key_is_rejected() {
        let f = EdgeTypeFilter::Any.with_hop(0, HopFilter::default());
        assert_eq!(f.validate(), Err(ValidationError::InvalidHop { hop: 0 }));
    }

    #[test]
    fn deserializes_from_json() {
        let f: EdgeTypeFilter = serde_json::from_str(
            r#"{"mode":"rules","exclude":["CONTRADICTS"],"per_hop":{"2":{"include":["IMPORTS"]}}}"#,
        )
        .unwrap();
        assert!(!f.effective(1).allows(EdgeType::Contradicts));
        assert!(f.effective(2).allows(EdgeType::Imports));
        assert!(!f.effective(2).allows(EdgeType::SimilarTo));
    }

    #[test]
    fn per_hop_survives_json_round_trip() {
        let f = EdgeTypeFilter::rules(HopFilter::exclude([EdgeType::Contradicts]))
            .with_hop(1, HopFilter::include([EdgeType::LinksTo]))
            .with_hop(3, HopFilter::exclude([EdgeType::SimilarTo]));
        let json = serde_json::to_string(&f).unwrap();
        let back: EdgeTypeFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn non_numeric_hop_key_is_a_decode_error() {
        let err = serde_json::from_str::<EdgeTypeFilter>(
            r#"{"mode":"rules","per_hop":{"two":{"include":["IMPORTS"]}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid hop key `two`"));
    }
}
