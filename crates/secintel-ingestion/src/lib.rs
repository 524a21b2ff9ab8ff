//! secintel-ingestion — Paper retrieval and the enrichment pipeline.
//!
//! The search API and the webpage fetcher are external collaborators: they
//! hand raw records and plain text to the pipeline, which enriches and
//! persists them. Everything network-facing runs under the shared retry
//! policy.

pub mod models;
pub mod pipeline;
pub mod sources;
pub mod webpage;

pub use models::RawPaper;
pub use pipeline::Enricher;
pub use sources::SearchSource;
