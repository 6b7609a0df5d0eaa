//! # lore-core
//!
//! Foundation crate for the Lore retrieval engine.
//! Defines the data model (learnings, edges, anchors), expansion and search result
//! shapes, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod anchor;
pub mod config;
pub mod constants;
pub mod errors;
pub mod graph;
pub mod learning;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use anchor::{Anchor, AnchorStatus, AnchorType};
pub use config::LoreConfig;
pub use errors::{ErrorKind, LoreError, LoreResult, ValidationError};
pub use graph::{Direction, Edge, EdgeFilter, EdgeType, NodeKind, NodeRef};
pub use learning::{Learning, SourceType};
