//! Collaborator seams. Engines borrow these as `&dyn Trait`.

mod anchor_store;
mod edge_store;
mod embedding;
mod learning_store;
mod reranker;
mod vector_store;

pub use anchor_store::IAnchorStore;
pub use edge_store::IEdgeStore;
pub use embedding::{IEmbeddingModel, IEmbeddingProvider};
pub use learning_store::ILearningStore;
pub use reranker::IRerankerProvider;
pub use vector_store::IVectorStore;
