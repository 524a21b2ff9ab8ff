//! Search collaborators supplying raw paper records.

pub mod arxiv;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::RawPaper;

/// A searchable literature source.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Run a free-text query, bounded by `max_results`, optionally limited
    /// to papers submitted on or after `start_date`.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        start_date: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<RawPaper>>;
}
