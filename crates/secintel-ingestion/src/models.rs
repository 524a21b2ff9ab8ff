//! Data models for the ingestion pipeline.

use serde::{Deserialize, Serialize};

/// A paper as delivered by the search collaborator, before enrichment.
/// Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPaper {
    pub title: String,
    /// Ordered author list; joined with ", " for storage and deduplication.
    pub authors: Vec<String>,
    pub abstract_text: String,
    /// ISO-ish timestamp as returned by the source.
    pub publication_date: String,
    pub pdf_link: Option<String>,
    /// Canonical landing page; used to fetch extended text.
    pub web_link: String,
}

impl RawPaper {
    pub fn authors_joined(&self) -> String {
        self.authors.join(", ")
    }
}
