//! YouTube transcript source.

use super::{TranscriptOutcome, TranscriptSegment, TranscriptSource};
use crate::error::{Result, TubeQaError};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

/// Transcript source backed by YouTube's caption tracks.
pub struct YoutubeTranscriptSource {
    api: YouTubeTranscriptApi,
}

impl YoutubeTranscriptSource {
    /// Create a source without cookies or proxies.
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TubeQaError::Config(format!("Failed to create YouTube transcript client: {}", e))
        })?;
        Ok(Self { api })
    }
}

/// Map a transcript API failure onto the outcomes the fetcher distinguishes.
fn classify(err: &CouldNotRetrieveTranscript) -> TranscriptOutcome {
    match &err.reason {
        Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled { .. }) => {
            TranscriptOutcome::Disabled
        }
        Some(CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }) => {
            TranscriptOutcome::NoMatchingLanguage
        }
        _ => TranscriptOutcome::Failed(err.to_string()),
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str, language: &str) -> TranscriptOutcome {
        match self.api.fetch_transcript(video_id, &[language], false).await {
            Ok(transcript) => {
                debug!(
                    "Fetched {} snippets ({})",
                    transcript.snippets.len(),
                    transcript.language_code
                );
                TranscriptOutcome::Found(
                    transcript
                        .snippets
                        .into_iter()
                        .map(|s| TranscriptSegment::new(s.start, s.text))
                        .collect(),
                )
            }
            Err(e) => classify(&e),
        }
    }
}

fn video_id_regex() -> &'static Regex {
    static VIDEO_ID: OnceLock<Regex> = OnceLock::new();
    VIDEO_ID.get_or_init(|| {
        // Matches various YouTube URL formats and bare video IDs
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex")
    })
}

/// Extract the video ID from a YouTube URL or bare ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    let caps = video_id_regex().captures(input.trim())?;

    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use yt_transcript_rs::TranscriptList;

    fn failure(reason: Option<CouldNotRetrieveTranscriptReason>) -> CouldNotRetrieveTranscript {
        CouldNotRetrieveTranscript {
            video_id: "dQw4w9WgXcQ".to_string(),
            reason,
        }
    }

    #[test]
    fn test_classify_failures() {
        assert_eq!(
            classify(&failure(Some(CouldNotRetrieveTranscriptReason::TranscriptsDisabled))),
            TranscriptOutcome::Disabled
        );

        let no_transcript = CouldNotRetrieveTranscriptReason::NoTranscriptFound {
            requested_language_codes: vec!["hi".to_string()],
            transcript_data: TranscriptList::new(
                "dQw4w9WgXcQ".to_string(),
                HashMap::new(),
                HashMap::new(),
                Vec::new(),
            ),
        };
        assert_eq!(
            classify(&failure(Some(no_transcript))),
            TranscriptOutcome::NoMatchingLanguage
        );

        match classify(&failure(Some(CouldNotRetrieveTranscriptReason::VideoUnavailable))) {
            TranscriptOutcome::Failed(message) => {
                assert!(message.contains("dQw4w9WgXcQ"));
                assert!(message.contains("no longer available"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert!(matches!(
            classify(&failure(None)),
            TranscriptOutcome::Failed(_)
        ));
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=42"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=120"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("  dQw4w9WgXcQ "),
            Some("dQw4w9WgXcQ".to_string())
        );

        assert_eq!(extract_video_id("not-a-video-id"), None);
        assert_eq!(extract_video_id(""), None);
    }
}
