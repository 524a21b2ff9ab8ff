//! secintel-ranker — Rule-based topic categorization and relevance scoring.
//!
//! Both halves are pure: the categorizer walks a data-driven trigger table,
//! the scorer folds weighted term frequencies over the abstract.

pub mod rules;
pub mod scorer;

pub use rules::{CategoryRule, RuleTable, UNCATEGORIZED};
pub use scorer::relevance_score;
