//! In-memory vector index.
//!
//! Exhaustive cosine scan; transcripts produce at most a few hundred chunks.

use super::{cosine_similarity, IndexEntry, SearchResult, VectorIndex};
use crate::error::{Result, TubeQaError};

/// Immutable in-memory index over one video's chunks.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl MemoryIndex {
    /// Build an index. All embeddings must share one dimension.
    pub fn new(entries: Vec<IndexEntry>) -> Result<Self> {
        let dimensions = entries.first().map(|e| e.embedding.len()).unwrap_or(0);

        if let Some(bad) = entries.iter().find(|e| e.embedding.len() != dimensions) {
            return Err(TubeQaError::VectorStore(format!(
                "Embedding dimension mismatch: expected {}, got {}",
                dimensions,
                bad.embedding.len()
            )));
        }

        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Build an index from parallel chunk and embedding lists.
    pub fn from_chunks(chunks: Vec<String>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(TubeQaError::VectorStore(format!(
                "Got {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        Self::new(
            chunks
                .into_iter()
                .zip(embeddings)
                .map(|(content, embedding)| IndexEntry::new(content, embedding))
                .collect(),
        )
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl VectorIndex for MemoryIndex {
    fn search(&self, query_embedding: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        if query_embedding.len() != self.dimensions {
            return Err(TubeQaError::VectorStore(format!(
                "Query has {} dimensions, index has {}",
                query_embedding.len(),
                self.dimensions
            )));
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| SearchResult {
                content: entry.content.clone(),
                score: cosine_similarity(query_embedding, &entry.embedding),
                position,
            })
            .collect();

        // Stable sort: equal scores keep transcript order.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(k);

        Ok(results)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
