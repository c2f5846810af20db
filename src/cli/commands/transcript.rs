//! Transcript command implementation.

use super::resolve_video_id;
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{TranscriptFetcher, YoutubeTranscriptSource};
use anyhow::Result;
use std::sync::Arc;

/// Run the transcript command.
pub async fn run_transcript(video: &str, settings: Settings) -> Result<()> {
    let video_id = resolve_video_id(video)?;

    let fetcher = TranscriptFetcher::new(
        Arc::new(YoutubeTranscriptSource::new()?),
        settings.transcript.languages,
    );

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video_id));
    let result = fetcher.fetch(&video_id).await;
    spinner.finish_and_clear();

    match result {
        Ok(transcript) => {
            if transcript.is_empty() {
                Output::warning(&format!("The transcript of {} has no text.", video_id));
            } else {
                println!("{}", transcript);
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&e.to_string());
            if e.is_not_found() {
                Output::info(&format!("Languages tried: {}", fetcher.languages().join(", ")));
            }
            Err(e.into())
        }
    }
}
