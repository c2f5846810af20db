//! Error types for tubeqa.

use thiserror::Error;

/// Why a transcript could not be produced for a video.
///
/// `Disabled` and `NoTranscript` are "not found" conditions the caller can act on;
/// `Fetch` covers everything else the transcript service reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Transcripts are disabled for this video.")]
    Disabled { video_id: String },

    #[error("No transcript found in any of the requested languages ({}).", .languages.join(", "))]
    NoTranscript {
        video_id: String,
        languages: Vec<String>,
    },

    #[error("Error fetching transcript: {message}")]
    Fetch { video_id: String, message: String },
}

impl TranscriptError {
    /// Whether this error means the transcript does not exist (as opposed to a failed request).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TranscriptError::Disabled { .. } | TranscriptError::NoTranscript { .. }
        )
    }
}

/// Library-level error type for tubeqa operations.
#[derive(Error, Debug)]
pub enum TubeQaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Retriever cache error: {0}")]
    Cache(String),

    #[error("Answer generation failed: {0}")]
    Generation(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias for tubeqa operations.
pub type Result<T> = std::result::Result<T, TubeQaError>;
