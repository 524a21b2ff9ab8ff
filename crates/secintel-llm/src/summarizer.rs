//! Length-bounded abstract summarization with graceful degradation.
//!
//! The caller-facing contract distinguishes three outcomes:
//!   `Some(text)` — a summary was produced;
//!   `Some("")`   — the input was blank, nothing to summarize;
//!   `None`       — the capability failed after retries.

use std::sync::Arc;

use tracing::{error, warn};

use secintel_common::RetryPolicy;

use crate::backend::{LlmBackend, LlmRequest, Message};

const MAX_SUMMARY_WORDS: usize = 150;
const MIN_SUMMARY_WORDS: usize = 50;
const MAX_LENGTH_FACTOR: f64 = 0.6;
const MIN_LENGTH_FACTOR: f64 = 0.3;

const SYSTEM_PROMPT: &str =
    "You are a scientific abstract summarizer. Condense the user's text into \
     a single plain-text summary. Respond with the summary only.";

/// Summary length targets derived from input length: short inputs get
/// proportionally short summaries, long inputs are capped.
fn length_bounds(word_count: usize) -> (usize, usize) {
    let max_words = MAX_SUMMARY_WORDS.min((word_count as f64 * MAX_LENGTH_FACTOR) as usize);
    let min_words = MIN_SUMMARY_WORDS.min((word_count as f64 * MIN_LENGTH_FACTOR) as usize);
    (min_words, max_words)
}

pub struct Summarizer {
    backend: Arc<dyn LlmBackend>,
    retry: RetryPolicy,
}

impl Summarizer {
    pub fn new(backend: Arc<dyn LlmBackend>, retry: RetryPolicy) -> Self {
        Self { backend, retry }
    }

    /// Summarize `text` with deterministic decoding (temperature 0).
    pub async fn summarize(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            warn!("received empty text for summarization, skipping");
            return Some(String::new());
        }

        let word_count = text.split_whitespace().count();
        let (min_words, max_words) = length_bounds(word_count);

        let request = LlmRequest {
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: format!(
                        "{SYSTEM_PROMPT} Use between {min_words} and {max_words} words."
                    ),
                },
                Message {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            model: None,
            max_tokens: Some((max_words * 2) as u32),
            temperature: Some(0.0),
        };

        match self
            .retry
            .run("summarization", || self.backend.complete(request.clone()))
            .await
        {
            Ok(resp) => Some(resp.content.trim().to_string()),
            Err(e) => {
                error!(model = self.backend.model_id(), "failed to summarize text: {e}");
                None
            }
        }
    }
}
