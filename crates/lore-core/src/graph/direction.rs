use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which edges of a node a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Edges where the node is the source.
    #[default]
    Outbound,
    /// Edges where the node is the target.
    Inbound,
    /// Outbound first, then inbound.
    Both,
}

impl Direction {
    /// The single-direction passes this direction is made of, in order.
    pub fn passes(&self) -> &'static [Direction] {
        match self {
            Self::Outbound => &[Direction::Outbound],
            Self::Inbound => &[Direction::Inbound],
            Self::Both => &[Direction::Outbound, Direction::Inbound],
        }
    }
}
