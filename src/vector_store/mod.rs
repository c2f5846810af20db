//! Vector index abstraction for tubeqa.
//!
//! One index is built per video from its embedded transcript chunks and never
//! modified afterwards.

mod builder;
mod memory;

pub use builder::{EmbeddingIndexBuilder, IndexBuilder};
pub use memory::MemoryIndex;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A chunk of transcript text with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Chunk text, including any `[Time: N]` markers.
    pub content: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
}

impl IndexEntry {
    pub fn new(content: String, embedding: Vec<f32>) -> Self {
        Self { content, embedding }
    }
}

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Matched chunk text.
    pub content: String,
    /// Similarity score (higher is better).
    pub score: f32,
    /// Position of the chunk in the transcript.
    pub position: usize,
}

/// Trait for per-video vector indexes.
pub trait VectorIndex: Send + Sync {
    /// The `k` entries most similar to `query_embedding`, most similar first.
    fn search(&self, query_embedding: &[f32], k: usize) -> Result<Vec<SearchResult>>;

    /// Number of indexed chunks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
