//! Embedding models and the disabled-embeddings provider.

pub mod noop;
pub mod tfidf;

use lore_core::config::EmbeddingConfig;
use lore_core::traits::IEmbeddingModel;

pub use noop::NoopEmbeddingProvider;
pub use tfidf::TfIdfModel;

/// Build the model named by `config.provider`. Unknown names fall back to
/// TF-IDF, which needs nothing external.
pub fn create_model(config: &EmbeddingConfig) -> Box<dyn IEmbeddingModel> {
    match config.provider.as_str() {
        "tfidf" => Box::new(TfIdfModel::new(config.dimensions)),
        other => {
            tracing::warn!(provider = other, "unknown embedding provider, using tfidf");
            Box::new(TfIdfModel::new(config.dimensions))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_falls_back_to_tfidf() {
        let config = EmbeddingConfig {
            provider: "onnx".into(),
            dimensions: 32,
            ..Default::default()
        };
        let model = create_model(&config);
        assert_eq!(model.name(), "tfidf");
        assert_eq!(model.dimensions(), 32);
    }
}
