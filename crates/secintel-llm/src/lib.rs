//! secintel-llm — Summarization backend abstraction.
//!
//! The generative capability is opaque to the rest of the pipeline: text in,
//! short text out, or a failure the caller degrades on.

pub mod backend;
pub mod summarizer;

pub use backend::{LlmBackend, LlmError, LlmRequest, LlmResponse, Message, OpenAiCompatibleBackend};
pub use summarizer::Summarizer;
