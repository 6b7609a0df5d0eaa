/// Lore system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard ceiling on graph expansion depth, regardless of configuration.
pub const MAX_EXPANSION_DEPTH: u32 = 10;

/// Maximum number of ids accepted by a single usage-recording call.
pub const MAX_USAGE_BATCH_SIZE: usize = 500;

/// Default weight for newly created edges.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Score assigned to learnings anchored directly to an input file.
pub const ANCHORED_SEED_SCORE: f64 = 1.0;
