//! Embedding generation for semantic search and retrieval.

mod local;
mod openai;

pub(crate) use local::parse_model;
pub use local::FastEmbedder;
pub use openai::OpenAIEmbedder;

use crate::config::{EmbeddingProvider, Settings};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions (0 if unknown until the first call).
    fn dimensions(&self) -> usize;
}

/// Create the embedder selected in the settings. The model is loaded once here.
pub fn create_embedder(settings: &Settings) -> Result<Arc<dyn Embedder>> {
    match settings.embedding.provider {
        EmbeddingProvider::FastEmbed => Ok(Arc::new(FastEmbedder::new(settings.embedding.model())?)),
        EmbeddingProvider::OpenAI => {
            let client = crate::openai::create_client(&settings.llm, settings.api_key()?)?;
            Ok(Arc::new(OpenAIEmbedder::with_client(
                client,
                settings.embedding.model(),
                settings.embedding.dimensions,
            )))
        }
    }
}
