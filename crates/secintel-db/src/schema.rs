//! Record types for the papers table.

use serde::{Deserialize, Serialize};

/// A fully enriched paper, ready to persist. Authors are pre-joined into a
/// single string because they are part of the uniqueness key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedPaper {
    pub title: String,
    pub authors: String,
    pub abstract_text: String,
    pub publication_date: String,
    /// Comma-joined topic labels; never empty ("Uncategorized" fallback).
    pub category: String,
    pub relevance_score: i64,
    /// Verbatim copy of the abstract.
    pub summary: String,
    /// None when summarization failed; `Some("")` when the input was blank.
    pub llm_summary: Option<String>,
    pub pdf_link: Option<String>,
    /// None when the web fetch or the second summarization pass degraded.
    pub full_text_summary: Option<String>,
    /// Comma-joined entities-then-keywords.
    pub keywords: String,
}

/// A persisted row: the enriched record plus its rowid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPaper {
    pub id: i64,
    pub paper: EnrichedPaper,
}
