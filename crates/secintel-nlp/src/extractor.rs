//! Entity and keyword extraction over abstract text.
//!
//! Entity spans come from an Aho-Corasick automaton built over the phrase
//! dictionary (linear-time matching, no model inference). Keywords are the
//! remaining alphabetic, non-stop-word tokens ranked by frequency.

use std::collections::{HashMap, HashSet};

use aho_corasick::{AhoCorasick, MatchKind};
use stop_words::{get as stop_word_list, LANGUAGE};
use tracing::debug;

use crate::lexicon::SecurityLexicon;

/// Extraction result for one text. Entities and keywords are separate
/// output channels: entities keep occurrence order and duplicates, keywords
/// are deduplicated and frequency-ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSet {
    pub entities: Vec<String>,
    pub keywords: Vec<String>,
}

impl KeywordSet {
    /// Union for categorization and storage: entities first, then keywords.
    pub fn combined(&self) -> Vec<String> {
        self.entities
            .iter()
            .chain(self.keywords.iter())
            .cloned()
            .collect()
    }

    /// Comma-joined storage form of `combined()`.
    pub fn joined(&self) -> String {
        self.combined().join(", ")
    }
}

/// Keyword/entity extraction service. Build once, reuse for the whole run.
pub struct KeywordExtractor {
    automaton: AhoCorasick,
    stop_words: HashSet<String>,
}

impl KeywordExtractor {
    pub fn new(lexicon: &SecurityLexicon) -> anyhow::Result<Self> {
        let phrases: Vec<String> = lexicon.phrases().map(|p| p.to_lowercase()).collect();
        // LeftmostLongest so "large language models" wins over the nested
        // "language models".
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&phrases)?;

        let stop_words: HashSet<String> = stop_word_list(LANGUAGE::English)
            .into_iter()
            .collect();

        debug!(
            phrases = phrases.len(),
            stop_words = stop_words.len(),
            "keyword extractor ready"
        );

        Ok(Self { automaton, stop_words })
    }

    /// Extract entities and up to `max_keywords - entities.len()` keywords
    /// from `text`. The keyword budget never goes negative: once entities
    /// fill the cap, the keyword list is empty.
    pub fn extract(&self, text: &str, max_keywords: usize) -> KeywordSet {
        let lowered = text.to_lowercase();
        let entities = self.detect_entities(&lowered);
        let keywords = self.rank_keywords(&lowered, max_keywords.saturating_sub(entities.len()));
        KeywordSet { entities, keywords }
    }

    /// Every dictionary match in occurrence order, duplicates intact.
    fn detect_entities(&self, lowered: &str) -> Vec<String> {
        let bytes = lowered.as_bytes();
        self.automaton
            .find_iter(lowered)
            .filter(|m| on_word_boundary(bytes, m.start(), m.end()))
            .map(|m| lowered[m.start()..m.end()].to_string())
            .collect()
    }

    fn rank_keywords(&self, lowered: &str, budget: usize) -> Vec<String> {
        if budget == 0 {
            return Vec::new();
        }

        // Frequency over the filtered token stream, duplicates intact;
        // `order` holds each surviving token once, in first-seen order.
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for token in lowered.split(|c: char| !c.is_alphanumeric()) {
            if !self.keep_token(token) {
                continue;
            }
            let count = counts.entry(token).or_insert(0);
            if *count == 0 {
                order.push(token);
            }
            *count += 1;
        }

        // Stable sort: equal frequencies keep first-seen order.
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        order.truncate(budget);
        order.into_iter().map(str::to_string).collect()
    }

    /// Alphabetic, non-stop-word, longer than two characters. Numeric and
    /// mixed alphanumeric tokens never pass the alphabetic test.
    fn keep_token(&self, token: &str) -> bool {
        !token.is_empty()
            && token.chars().all(char::is_alphabetic)
            && token.chars().count() > 2
            && !self.stop_words.contains(token)
    }
}

/// A match counts only when it is not embedded in a larger word, so
/// "alignment" does not fire inside "misalignment".
fn on_word_boundary(bytes: &[u8], start: usize, end: usize) -> bool {
    let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
    let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
    before_ok && after_ok
}
