//! Test doubles for the external services.

use crate::chunking::RecursiveCharacterSplitter;
use crate::embedding::Embedder;
use crate::error::{Result, TubeQaError};
use crate::rag::Generator;
use crate::transcript::{TranscriptOutcome, TranscriptSource};
use crate::vector_store::{EmbeddingIndexBuilder, IndexBuilder, VectorIndex};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transcript source answering from a fixed table; unknown pairs have no transcript.
#[derive(Default)]
pub struct FakeTranscriptSource {
    outcomes: HashMap<(String, String), TranscriptOutcome>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeTranscriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, video_id: &str, language: &str, outcome: TranscriptOutcome) -> Self {
        self.outcomes
            .insert((video_id.to_string(), language.to_string()), outcome);
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscriptSource {
    async fn fetch(&self, video_id: &str, language: &str) -> TranscriptOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((video_id.to_string(), language.to_string()));
        self.outcomes
            .get(&(video_id.to_string(), language.to_string()))
            .cloned()
            .unwrap_or(TranscriptOutcome::NoMatchingLanguage)
    }
}

/// Embeds text as character frequencies: a-z, 0-9, and one bucket for everything else.
#[derive(Default)]
pub struct HashEmbedder;

impl HashEmbedder {
    pub const DIMENSIONS: usize = 37;

    pub fn new() -> Self {
        Self
    }

    fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0; Self::DIMENSIONS];
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            let c = c.to_ascii_lowercase();
            let slot = match c {
                'a'..='z' => c as usize - 'a' as usize,
                '0'..='9' => 26 + c as usize - '0' as usize,
                _ => 36,
            };
            v[slot] += 1.0;
        }
        v
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        Self::DIMENSIONS
    }
}

/// Embedder whose model is never available.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(TubeQaError::Embedding("model unavailable".to_string()))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(TubeQaError::Embedding("model unavailable".to_string()))
    }

    fn dimensions(&self) -> usize {
        0
    }
}

/// Index builder counting its invocations; optionally slow or failing.
pub struct CountingIndexBuilder {
    inner: EmbeddingIndexBuilder,
    builds: AtomicUsize,
    fail_first: usize,
    delay: Option<Duration>,
}

impl CountingIndexBuilder {
    pub fn new() -> Self {
        Self {
            inner: EmbeddingIndexBuilder::new(
                RecursiveCharacterSplitter::default(),
                Arc::new(HashEmbedder::new()),
            ),
            builds: AtomicUsize::new(0),
            fail_first: 0,
            delay: None,
        }
    }

    /// Fail the first `n` builds.
    pub fn failing_first(n: usize) -> Self {
        Self {
            fail_first: n,
            ..Self::new()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndexBuilder for CountingIndexBuilder {
    async fn build(&self, transcript_text: &str) -> Result<Arc<dyn VectorIndex>> {
        let n = self.builds.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if n <= self.fail_first {
            return Err(TubeQaError::Embedding("model unavailable".to_string()));
        }
        self.inner.build(transcript_text).await
    }
}

/// Generator returning a fixed completion and recording the prompts it was given.
pub struct ScriptedGenerator {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

/// Generator whose provider is always down.
pub struct FailingGenerator;

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(TubeQaError::OpenAI("service unavailable".to_string()))
    }
}
