//! Relevance scoring from weighted term frequency.

use std::collections::HashMap;

const KEYWORD_WEIGHT: i64 = 2;
const ENTITY_WEIGHT: i64 = 3;

/// Weighted salience of a paper's abstract: each keyword occurrence counts
/// double, each entity occurrence triple. Terms absent from the abstract
/// contribute nothing, so the score is never negative.
///
/// The frequency table is keyed by whitespace-split single tokens, so a
/// multi-word entity only scores when it also occurs as one token.
pub fn relevance_score(abstract_text: &str, keywords: &[String], entities: &[String]) -> i64 {
    let lowered = abstract_text.to_lowercase();
    let mut freq: HashMap<&str, i64> = HashMap::new();
    for token in lowered.split_whitespace() {
        *freq.entry(token).or_insert(0) += 1;
    }

    let count = |term: &str| freq.get(term.to_lowercase().as_str()).copied().unwrap_or(0);

    let keyword_score: i64 = keywords.iter().map(|k| count(k) * KEYWORD_WEIGHT).sum();
    let entity_score: i64 = entities.iter().map(|e| count(e) * ENTITY_WEIGHT).sum();

    keyword_score + entity_score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_score_is_zero_without_matches() {
        let score = relevance_score(
            "Nothing relevant here.",
            &terms(&["injection"]),
            &terms(&["language models"]),
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn test_keyword_and_entity_weights() {
        // "injection" twice, "fuzzing" once as keyword, "claude" once as entity.
        let text = "injection fuzzing injection claude";
        let score = relevance_score(text, &terms(&["injection", "fuzzing"]), &terms(&["claude"]));
        assert_eq!(score, 2 * 2 + 1 * 2 + 1 * 3);
    }

    #[test]
    fn test_monotone_in_term_frequency() {
        let kws = terms(&["injection"]);
        let lo = relevance_score("injection attack", &kws, &[]);
        let hi = relevance_score("injection injection attack", &kws, &[]);
        assert!(hi >= lo);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let score = relevance_score("Injection INJECTION injection", &terms(&["injection"]), &[]);
        assert_eq!(score, 6);
    }

    #[test]
    fn test_multiword_entity_scores_zero_against_token_table() {
        // A multi-word entity cannot match the single-token frequency
        // table, so only the keywords contribute here.
        let text = "Large language models are vulnerable to prompt injection \
                    and jailbreak attacks.";
        let score = relevance_score(
            text,
            &terms(&["injection", "jailbreak"]),
            &terms(&["language models"]),
        );
        // freq("injection") = 1, freq("jailbreak") = 1, freq("language models") = 0
        assert_eq!(score, 2 + 2);
    }

    #[test]
    fn test_punctuation_sticks_to_whitespace_tokens() {
        // "attacks." is a distinct token from "attacks" under whitespace
        // splitting; the table is deliberately that crude.
        let score = relevance_score("jailbreak attacks.", &terms(&["attacks"]), &[]);
        assert_eq!(score, 0);
    }
}
