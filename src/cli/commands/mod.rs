//! CLI command implementations.

mod ask;
mod config;
pub mod serve;
mod transcript;

pub use ask::run_ask;
pub use config::run_config;
pub use serve::run_serve;
pub use transcript::run_transcript;

use anyhow::{anyhow, Result};

/// Resolve a YouTube URL or bare ID given on the command line.
fn resolve_video_id(input: &str) -> Result<String> {
    crate::transcript::extract_video_id(input)
        .ok_or_else(|| anyhow!("Not a YouTube URL or video ID: {}", input))
}
