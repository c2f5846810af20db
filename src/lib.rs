//! tubeqa - Question answering over YouTube videos
//!
//! Answers natural-language questions about a YouTube video from its transcript, citing
//! the moments in the video that support each point.
//!
//! # Overview
//!
//! For each question tubeqa:
//! - Fetches the video's transcript and annotates it with `[Time: N]` markers
//! - Splits and embeds it once per video, keeping the index in memory
//! - Retrieves the passages closest to the question
//! - Asks a language model for a bullet-point answer with timestamp links
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `transcript` - Transcript retrieval with language fallback
//! - `chunking` - Recursive character splitting
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory vector index
//! - `cache` - Per-video index cache
//! - `rag` - Prompting and answer generation
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use tubeqa::config::Settings;
//! use tubeqa::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let answer = orchestrator.ask("dQw4w9WgXcQ", "What is this song about?").await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod transcript;
pub mod vector_store;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Result, TranscriptError, TubeQaError};
