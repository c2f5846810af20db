//! Pipeline orchestrator for tubeqa.
//!
//! Coordinates one question from transcript fetch to formatted answer.

use crate::cache::RetrieverCache;
use crate::chunking::{ChunkingConfig, RecursiveCharacterSplitter};
use crate::config::{Prompts, Settings};
use crate::embedding::{create_embedder, Embedder};
use crate::error::Result;
use crate::rag::{AnswerEngine, ChatGenerator, Generator};
use crate::transcript::{AnnotatedTranscript, TranscriptFetcher, TranscriptSource, YoutubeTranscriptSource};
use crate::vector_store::{EmbeddingIndexBuilder, IndexBuilder};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The main orchestrator for the question-answering pipeline.
pub struct Orchestrator {
    fetcher: TranscriptFetcher,
    cache: RetrieverCache,
    builder: Arc<dyn IndexBuilder>,
    engine: AnswerEngine,
}

impl Orchestrator {
    /// Create an orchestrator talking to YouTube, the configured embedder and the LLM.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let source: Arc<dyn TranscriptSource> = Arc::new(YoutubeTranscriptSource::new()?);

        let embedder = create_embedder(settings)?;

        let client = crate::openai::create_client(&settings.llm, settings.api_key()?)?;
        let generator: Arc<dyn Generator> = Arc::new(ChatGenerator::new(client, &settings.llm.model));

        info!(
            "Using {} embeddings and {} for answers",
            settings.embedding.provider, settings.llm.model
        );

        Self::with_components(settings, prompts, source, embedder, generator)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        source: Arc<dyn TranscriptSource>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Result<Self> {
        let splitter = RecursiveCharacterSplitter::new(ChunkingConfig::try_from(&settings.chunking)?);
        let builder: Arc<dyn IndexBuilder> =
            Arc::new(EmbeddingIndexBuilder::new(splitter, embedder.clone()));

        Ok(Self::from_parts(
            TranscriptFetcher::new(source, settings.transcript.languages.clone()),
            builder,
            AnswerEngine::new(embedder, generator, settings.retrieval.top_k).with_prompts(prompts),
        ))
    }

    /// Assemble an orchestrator from already built stages.
    pub fn from_parts(
        fetcher: TranscriptFetcher,
        builder: Arc<dyn IndexBuilder>,
        engine: AnswerEngine,
    ) -> Self {
        Self {
            fetcher,
            cache: RetrieverCache::new(),
            builder,
            engine,
        }
    }

    /// The retriever cache shared by all questions.
    pub fn cache(&self) -> &RetrieverCache {
        &self.cache
    }

    /// Fetch the annotated transcript for a video.
    pub async fn transcript(&self, video_id: &str) -> Result<AnnotatedTranscript> {
        Ok(self.fetcher.fetch(video_id).await?)
    }

    /// Answer a question about a video.
    ///
    /// The transcript is fetched on every call; the index is built only the first time a
    /// video is seen.
    #[instrument(skip(self))]
    pub async fn ask(&self, video_id: &str, question: &str) -> Result<String> {
        info!("Processing video: {} | Question: {}", video_id, question);

        let transcript = self.transcript(video_id).await?;
        let index = self
            .cache
            .get_or_build(video_id, transcript.as_str(), self.builder.as_ref())
            .await?;
        debug!("{} videos indexed", self.cache.len());

        self.engine.answer(video_id, question, index.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TranscriptError, TubeQaError};
    use crate::test_support::{
        CountingIndexBuilder, FakeTranscriptSource, FailingGenerator, HashEmbedder,
        ScriptedGenerator,
    };
    use crate::transcript::{TranscriptOutcome, TranscriptSegment};

    fn source() -> FakeTranscriptSource {
        FakeTranscriptSource::new()
            .with(
                "vid1",
                "en",
                TranscriptOutcome::Found(vec![
                    TranscriptSegment::new(0.0, "Python is versatile"),
                    TranscriptSegment::new(12.4, "memory is managed for you"),
                ]),
            )
            .with(
                "vid2",
                "hi",
                TranscriptOutcome::Found(vec![TranscriptSegment::new(3.0, "namaste")]),
            )
            .with("off", "hi", TranscriptOutcome::Disabled)
            .with("off", "en", TranscriptOutcome::Disabled)
    }

    fn orchestrator(
        builder: Arc<CountingIndexBuilder>,
        generator: Arc<dyn Generator>,
    ) -> Orchestrator {
        let fetcher = TranscriptFetcher::new(
            Arc::new(source()),
            vec!["hi".to_string(), "en".to_string()],
        );
        let engine = AnswerEngine::new(Arc::new(HashEmbedder::new()), generator, 3);
        Orchestrator::from_parts(fetcher, builder, engine)
    }

    #[tokio::test]
    async fn test_same_video_builds_once() {
        let builder = Arc::new(CountingIndexBuilder::new());
        let generator = Arc::new(ScriptedGenerator::new("* answer"));
        let orchestrator = orchestrator(builder.clone(), generator.clone());

        orchestrator.ask("vid1", "Is Python versatile?").await.unwrap();
        orchestrator.ask("vid1", "Who manages memory?").await.unwrap();

        assert_eq!(builder.builds(), 1);
        assert_eq!(orchestrator.cache().len(), 1);
        assert_eq!(generator.calls(), 2);
        assert!(generator.last_prompt().unwrap().contains("Who manages memory?"));
    }

    #[tokio::test]
    async fn test_different_videos_build_separately() {
        let builder = Arc::new(CountingIndexBuilder::new());
        let orchestrator = orchestrator(builder.clone(), Arc::new(ScriptedGenerator::new("ok")));

        orchestrator.ask("vid1", "q").await.unwrap();
        orchestrator.ask("vid2", "q").await.unwrap();

        assert_eq!(builder.builds(), 2);
        assert_eq!(orchestrator.cache().len(), 2);
        assert!(orchestrator.cache().contains("vid1"));
        assert!(orchestrator.cache().contains("vid2"));
    }

    #[tokio::test]
    async fn test_prompt_sees_annotated_transcript() {
        let builder = Arc::new(CountingIndexBuilder::new());
        let generator = Arc::new(ScriptedGenerator::new("ok"));
        let orchestrator = orchestrator(builder, generator.clone());

        orchestrator.ask("vid1", "memory").await.unwrap();

        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("[Time: 0] Python is versatile [Time: 12] memory is managed for you"));
        assert!(prompt.contains("https://youtu.be/vid1?t=SECONDS"));
    }

    #[tokio::test]
    async fn test_transcript_error_skips_build() {
        let builder = Arc::new(CountingIndexBuilder::new());
        let orchestrator = orchestrator(builder.clone(), Arc::new(ScriptedGenerator::new("ok")));

        let err = orchestrator.ask("off", "q").await.unwrap_err();
        assert!(matches!(
            err,
            TubeQaError::Transcript(TranscriptError::Disabled { .. })
        ));
        assert_eq!(builder.builds(), 0);
        assert!(orchestrator.cache().is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_keeps_index() {
        let builder = Arc::new(CountingIndexBuilder::new());
        let orchestrator = orchestrator(builder.clone(), Arc::new(FailingGenerator));

        assert!(orchestrator.ask("vid1", "q").await.is_err());
        assert!(orchestrator.ask("vid1", "q").await.is_err());

        assert_eq!(builder.builds(), 1);
        assert!(orchestrator.cache().contains("vid1"));
    }

    #[tokio::test]
    async fn test_with_components_uses_settings() {
        let mut settings = Settings::default();
        settings.transcript.languages = vec!["en".to_string()];

        let orchestrator = Orchestrator::with_components(
            &settings,
            Prompts::default(),
            Arc::new(source()),
            Arc::new(HashEmbedder::new()),
            Arc::new(ScriptedGenerator::new("  * done  \n\n")),
        )
        .unwrap();

        assert_eq!(orchestrator.ask("vid1", "q").await.unwrap(), "* done");
        assert!(orchestrator.ask("vid2", "q").await.is_err());
    }
}
