//! Ask command implementation.

use super::resolve_video_id;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(video: &str, question: &str, settings: Settings) -> Result<()> {
    let video_id = resolve_video_id(video)?;

    let spinner = Output::spinner("Loading embedding model...");
    let orchestrator = match Orchestrator::new(&settings) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    spinner.set_message(format!("Answering from the transcript of {}...", video_id));

    match orchestrator.ask(&video_id, question).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            println!("\n{}\n", answer);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
