//! # lore-embeddings
//!
//! Text embedding for hybrid search. [`TfIdfModel`] is a dependency-free hashing
//! model that is always available; [`EmbeddingEngine`] pairs a model with a
//! vector store and an L1 cache and is what retrieval consumes as an
//! `IEmbeddingProvider`. [`NoopEmbeddingProvider`] stands in when embeddings
//! are disabled.

pub mod cache;
pub mod engine;
pub mod providers;

pub use engine::EmbeddingEngine;
pub use providers::{create_model, NoopEmbeddingProvider, TfIdfModel};
