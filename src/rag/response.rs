//! Answer generation.

use super::context::format_context_for_prompt;
use super::Generator;
use crate::config::Prompts;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::VectorIndex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Answers questions about one video from its index.
pub struct AnswerEngine {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    top_k: usize,
}

impl AnswerEngine {
    /// Create an engine retrieving `top_k` chunks per question.
    pub fn new(embedder: Arc<dyn Embedder>, generator: Arc<dyn Generator>, top_k: usize) -> Self {
        Self {
            embedder,
            generator,
            prompts: Prompts::default(),
            top_k,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Build the prompt for a question from the chunks most similar to it.
    pub async fn build_prompt(
        &self,
        video_id: &str,
        question: &str,
        index: &dyn VectorIndex,
    ) -> Result<String> {
        let query_embedding = self.embedder.embed(question).await?;
        let results = index.search(&query_embedding, self.top_k)?;
        debug!("Retrieved {} of {} chunks", results.len(), index.len());

        let mut vars = HashMap::new();
        vars.insert("context".to_string(), format_context_for_prompt(&results));
        vars.insert("question".to_string(), question.to_string());
        vars.insert("video_id".to_string(), video_id.to_string());

        Ok(self.prompts.render_with_custom(&self.prompts.answer.user, &vars))
    }

    /// Answer a question. The model is called once; its output is only tidied, not checked.
    #[instrument(skip(self, index), fields(question = %question))]
    pub async fn answer(
        &self,
        video_id: &str,
        question: &str,
        index: &dyn VectorIndex,
    ) -> Result<String> {
        let prompt = self.build_prompt(video_id, question, index).await?;
        let raw = self.generator.generate(&prompt).await?;
        Ok(format_answer(&raw))
    }
}

/// Trim every line and drop blank ones, keeping the remaining lines in order.
pub fn format_answer(raw: &str) -> String {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
