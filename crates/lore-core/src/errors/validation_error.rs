use crate::graph::EdgeType;

/// Caller-supplied options or records that were rejected before any work ran.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("depth {depth} exceeds maximum {max}")]
    DepthTooLarge { depth: u32, max: u32 },

    #[error("decay factor must be finite and greater than 0, got {value}")]
    InvalidDecayFactor { value: f64 },

    #[error("max nodes must be at least 1, got {value}")]
    InvalidMaxNodes { value: usize },

    #[error("conflicting filters: {edge_type} is both included and excluded ({scope})")]
    ConflictingFilters { edge_type: EdgeType, scope: String },

    #[error("per-hop filter keys start at 1, got {hop}")]
    InvalidHop { hop: u32 },

    #[error("limit must be at least 1, got {value}")]
    InvalidLimit { value: usize },

    #[error("{field} must be a finite number, got {value}")]
    InvalidScore { field: &'static str, value: f64 },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}
