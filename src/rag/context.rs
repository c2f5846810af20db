//! Context building for answer prompts.

use crate::vector_store::SearchResult;

/// Join retrieved chunk texts into the prompt's context block, one blank line apart.
pub fn format_context_for_prompt(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
