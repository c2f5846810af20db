//! Retrieval-augmented answering for a single video.
//!
//! Retrieves the chunks closest to the question, fills the answer prompt, and asks
//! the language model for a bullet-point answer with timestamp links.

pub mod context;
mod generator;
mod response;

pub use context::format_context_for_prompt;
pub use generator::{ChatGenerator, Generator};
pub use response::{format_answer, AnswerEngine};
