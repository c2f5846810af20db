//! Transcript retrieval for tubeqa.
//!
//! A [`TranscriptSource`] fetches timed caption segments for one video in one language.
//! The [`TranscriptFetcher`] walks the configured languages in order and turns the first
//! transcript it finds into an [`AnnotatedTranscript`], where every segment is prefixed
//! with a `[Time: N]` marker the language model later turns into timestamp links.

mod youtube;

pub use youtube::{extract_video_id, YoutubeTranscriptSource};

use crate::error::TranscriptError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A single caption segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start: f64,
    /// Caption text.
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }
}

/// Transcript text with `[Time: N]` markers in front of every segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedTranscript(String);

impl AnnotatedTranscript {
    /// Build the annotated text from segments in source order.
    ///
    /// Start times are truncated to whole seconds. Segment text is inserted as-is, so
    /// a literal `[Time:` inside a caption looks exactly like a real marker.
    pub fn from_segments(segments: &[TranscriptSegment]) -> Self {
        let text = segments
            .iter()
            .map(|s| format!("[Time: {}] {}", s.start.max(0.0) as u64, s.text))
            .collect::<Vec<_>>()
            .join(" ");
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AnnotatedTranscript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one attempt to fetch a transcript in a single language.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptOutcome {
    /// Segments in source order.
    Found(Vec<TranscriptSegment>),
    /// The uploader turned transcripts off for this video.
    Disabled,
    /// The video has transcripts, but none in the requested language.
    NoMatchingLanguage,
    /// Anything else: network, unknown video, rate limiting, unparsable response.
    Failed(String),
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript of `video_id` in `language`.
    async fn fetch(&self, video_id: &str, language: &str) -> TranscriptOutcome;
}

/// Fetches annotated transcripts, falling back through an ordered language list.
#[derive(Clone)]
pub struct TranscriptFetcher {
    source: Arc<dyn TranscriptSource>,
    languages: Vec<String>,
}

impl TranscriptFetcher {
    /// Create a fetcher trying `languages` in order.
    pub fn new(source: Arc<dyn TranscriptSource>, languages: Vec<String>) -> Self {
        Self { source, languages }
    }

    /// Languages tried, in order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Fetch the raw segments for a video.
    ///
    /// Every failed attempt moves on to the next language, whatever the failure was.
    /// The last attempt's failure is the one reported.
    #[instrument(skip(self))]
    pub async fn fetch_segments(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<TranscriptSegment>, TranscriptError> {
        let mut last = TranscriptOutcome::NoMatchingLanguage;

        for language in &self.languages {
            match self.source.fetch(video_id, language).await {
                TranscriptOutcome::Found(segments) => {
                    debug!("Found {} segments in '{}'", segments.len(), language);
                    return Ok(segments);
                }
                outcome => {
                    debug!("No usable transcript in '{}': {:?}", language, outcome);
                    last = outcome;
                }
            }
        }

        let err = match last {
            TranscriptOutcome::Disabled => TranscriptError::Disabled {
                video_id: video_id.to_string(),
            },
            TranscriptOutcome::Failed(message) => {
                warn!("Error fetching transcript for {}: {}", video_id, message);
                TranscriptError::Fetch {
                    video_id: video_id.to_string(),
                    message,
                }
            }
            TranscriptOutcome::NoMatchingLanguage | TranscriptOutcome::Found(_) => {
                TranscriptError::NoTranscript {
                    video_id: video_id.to_string(),
                    languages: self.languages.clone(),
                }
            }
        };

        Err(err)
    }

    /// Fetch a video's transcript and annotate it with time markers.
    pub async fn fetch(
        &self,
        video_id: &str,
    ) -> std::result::Result<AnnotatedTranscript, TranscriptError> {
        let segments = self.fetch_segments(video_id).await?;
        Ok(AnnotatedTranscript::from_segments(&segments))
    }
}
