// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "lore.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_MMAP_SIZE: u64 = 268_435_456; // 256 MB
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_ENABLED: bool = true;
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

// --- Retrieval ---
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 3;
pub const DEFAULT_RERANK_TOP_K: usize = 20;
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.005;
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 30.0;
pub const DEFAULT_OUTCOME_WEIGHT: f64 = 0.01;
pub const DEFAULT_EXPANSION_SEED_COUNT: usize = 5;

// --- Expansion ---
pub const DEFAULT_EXPANSION_DEPTH: u32 = 2;
pub const DEFAULT_DECAY_FACTOR: f64 = 0.7;
pub const DEFAULT_MAX_NODES: usize = 100;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;
