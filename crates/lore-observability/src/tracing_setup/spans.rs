//! Span definitions per operation: search, expansion, embedding, storage.

/// Create a search span.
#[macro_export]
macro_rules! search_span {
    ($query:expr, $limit:expr) => {
        tracing::info_span!("lore.search", query = %$query, limit = $limit)
    };
}

/// Create a graph expansion span.
#[macro_export]
macro_rules! expansion_span {
    ($seed_count:expr, $depth:expr) => {
        tracing::info_span!("lore.expansion", seed_count = $seed_count, depth = $depth)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr) => {
        tracing::info_span!("lore.embedding", provider = %$provider)
    };
}

/// Create a storage span.
#[macro_export]
macro_rules! storage_span {
    ($operation:expr) => {
        tracing::debug_span!("lore.storage", operation = %$operation)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SEARCH: &str = "lore.search";
    pub const EXPANSION: &str = "lore.expansion";
    pub const EMBEDDING: &str = "lore.embedding";
    pub const STORAGE: &str = "lore.storage";
}
