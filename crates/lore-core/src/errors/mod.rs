//! Error taxonomy. Subsystem errors fold into [`LoreError`] via `#[from]`, and
//! [`LoreError::kind`] lets callers branch on the failure class.

pub mod embedding_error;
pub mod retrieval_error;
pub mod storage_error;
pub mod validation_error;

pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;

/// Crate-wide result alias.
pub type LoreResult<T> = Result<T, LoreError>;

/// Top-level error for every Lore operation.
#[derive(Debug, thiserror::Error)]
pub enum LoreError {
    #[error("validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

/// Coarse failure class, stable across variant additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Store,
    Embedding,
    Retrieval,
    Config,
    Serialization,
    Concurrency,
}

impl LoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::StorageError(_) => ErrorKind::Store,
            Self::EmbeddingError(_) => ErrorKind::Embedding,
            Self::RetrievalError(_) => ErrorKind::Retrieval,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::SerializationError(_) => ErrorKind::Serialization,
            Self::ConcurrencyError(_) => ErrorKind::Concurrency,
        }
    }

    pub fn learning_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "learning",
            id: id.into(),
        }
    }

    pub fn anchor_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "anchor",
            id: id.into(),
        }
    }

    /// True for caller mistakes that no retry will fix.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
