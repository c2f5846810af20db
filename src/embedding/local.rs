//! Local sentence-transformer embeddings via fastembed.

use super::Embedder;
use crate::error::{Result, TubeQaError};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Embedder running a sentence-transformer model in-process.
///
/// The model is loaded once and shared; inference runs on tokio's blocking pool.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    dimensions: usize,
}

/// Resolve a model name to a fastembed model and its output dimensions.
pub(crate) fn parse_model(name: &str) -> Result<(EmbeddingModel, usize)> {
    let normalized = name
        .trim()
        .trim_start_matches("sentence-transformers/")
        .trim_start_matches("Qdrant/")
        .to_lowercase();

    match normalized.as_str() {
        "all-minilm-l6-v2" | "minilm" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "all-minilm-l12-v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        "paraphrase-multilingual-minilm-l12-v2" => {
            Ok((EmbeddingModel::ParaphraseMLMiniLML12V2, 384))
        }
        _ => Err(TubeQaError::Config(format!(
            "Unknown local embedding model: {}",
            name
        ))),
    }
}

impl FastEmbedder {
    /// Load the named model, downloading it on first use.
    pub fn new(model_name: &str) -> Result<Self> {
        let (model, dimensions) = parse_model(model_name)?;

        info!("Loading embedding model {}", model_name);
        let embedding = TextEmbedding::try_new(TextInitOptions::new(model)).map_err(|e| {
            TubeQaError::Embedding(format!("Failed to initialize embedding model: {}", e))
        })?;

        Ok(Self {
            model: Arc::new(Mutex::new(embedding)),
            dimensions,
        })
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| TubeQaError::Embedding("No embedding returned".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let model = self.model.clone();
        let texts = texts.to_vec();
        let embeddings = tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| TubeQaError::Embedding("Embedding model lock poisoned".to_string()))?;
            model
                .embed(texts, None)
                .map_err(|e| TubeQaError::Embedding(e.to_string()))
        })
        .await??;

        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
