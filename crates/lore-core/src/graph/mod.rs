//! Graph vocabulary: node identities, typed edges, traversal direction and filters.

mod direction;
mod edge;
mod edge_type;
mod filter;
mod node;

pub use direction::Direction;
pub use edge::Edge;
pub use edge_type::EdgeType;
pub use filter::EdgeFilter;
pub use node::{NodeKind, NodeRef};
