//! Building a video's index from its transcript text.

use super::{MemoryIndex, VectorIndex};
use crate::chunking::RecursiveCharacterSplitter;
use crate::embedding::Embedder;
use crate::error::{Result, TubeQaError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Trait for turning transcript text into a searchable index.
#[async_trait]
pub trait IndexBuilder: Send + Sync {
    async fn build(&self, transcript_text: &str) -> Result<Arc<dyn VectorIndex>>;
}

/// Chunks the transcript, embeds every chunk, and indexes the result in memory.
pub struct EmbeddingIndexBuilder {
    splitter: RecursiveCharacterSplitter,
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingIndexBuilder {
    pub fn new(splitter: RecursiveCharacterSplitter, embedder: Arc<dyn Embedder>) -> Self {
        Self { splitter, embedder }
    }
}

#[async_trait]
impl IndexBuilder for EmbeddingIndexBuilder {
    #[instrument(skip(self, transcript_text), fields(chars = transcript_text.len()))]
    async fn build(&self, transcript_text: &str) -> Result<Arc<dyn VectorIndex>> {
        let chunks = self.splitter.split(transcript_text);
        debug!("Split transcript into {} chunks", chunks.len());

        let embeddings = self.embedder.embed_batch(&chunks).await?;
        let index = MemoryIndex::from_chunks(chunks, embeddings)?;

        let expected = self.embedder.dimensions();
        if expected != 0 && !index.is_empty() && index.dimensions() != expected {
            return Err(TubeQaError::VectorStore(format!(
                "Embedder returned {}-dimensional vectors, expected {}",
                index.dimensions(),
                expected
            )));
        }

        Ok(Arc::new(index))
    }
}
