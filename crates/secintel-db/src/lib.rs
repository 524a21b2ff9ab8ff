//! secintel-db — SQLite persistence for enriched papers.
//!
//! One table, one writer, one transaction per batch. Duplicate inserts on
//! the logical key (title, authors, publication_date) are expected and
//! skipped, never treated as failures.

pub mod error;
pub mod schema;
pub mod store;

pub use error::{Result, StoreError};
pub use schema::{EnrichedPaper, StoredPaper};
pub use store::{BatchOutcome, PaperStore};
