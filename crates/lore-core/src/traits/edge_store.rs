use crate::errors::LoreResult;
use crate::graph::{Direction, Edge, EdgeFilter, NodeRef};

/// Typed, weighted, directed edges between nodes.
pub trait IEdgeStore: Send + Sync {
    /// Edges are immutable once created. A non-finite weight is rejected.
    fn create_edge(&self, edge: &Edge) -> LoreResult<()>;
    fn get_edge(&self, id: &str) -> LoreResult<Option<Edge>>;
    /// Edges touching `node` in the given direction that pass `filter`,
    /// in creation order. `Direction::Both` returns outbound edges first.
    fn edges_from(
        &self,
        node: &NodeRef,
        direction: Direction,
        filter: &EdgeFilter,
    ) -> LoreResult<Vec<Edge>>;
    fn edge_count(&self) -> LoreResult<usize>;
}
