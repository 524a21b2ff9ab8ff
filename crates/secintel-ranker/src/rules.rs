//! Trigger-word rule table for topic categorization.
//!
//! The table is configuration data, not logic: an ordered list of
//! (label, trigger set) pairs. A rule fires when any trigger is present in
//! the combined entity/keyword set; rules are independent, so one paper can
//! carry several labels.

use serde::{Deserialize, Serialize};

/// Fallback label when no rule fires. The category column is never empty.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub triggers: Vec<String>,
}

impl CategoryRule {
    pub fn new<S, I, T>(label: S, triggers: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            label: label.into(),
            triggers: triggers.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact membership test against the combined term set.
    fn fires(&self, combined: &[String]) -> bool {
        self.triggers
            .iter()
            .any(|t| combined.iter().any(|kw| kw == t))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleTable {
    /// The builtin LLM-security taxonomy.
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(
                    "Data Poisoning",
                    ["poison", "data", "tamper", "quantum", "backdoor", "corruption", "manipulate", "dataset"],
                ),
                CategoryRule::new(
                    "Prompt Injection",
                    ["injection", "jailbreak", "bypass", "in-context learning", "token manipulation", "malicious prompt", "chain of thought"],
                ),
                CategoryRule::new(
                    "Model Evasion",
                    ["evasion", "adversarial", "escape", "robustness", "gradient", "stealth", "obfuscation", "perturbation", "token masking"],
                ),
                CategoryRule::new(
                    "Knowledge Store Attacks",
                    ["knowledge graph", "retrieval", "semantic", "store", "query injection", "embedding manipulation"],
                ),
                CategoryRule::new(
                    "Embedding Attacks",
                    ["embedding", "vector search", "similarity manipulation", "hash collision", "semantic shift"],
                ),
                CategoryRule::new(
                    "Information Leakage",
                    ["leak", "data exposure", "token sampling", "privacy", "inference attack"],
                ),
                CategoryRule::new(
                    "Supply Chain Vulnerabilities",
                    ["pretrained model", "dependency", "distribution", "tampered"],
                ),
                CategoryRule::new(
                    "Misalignment Risks",
                    ["alignment", "control", "hallucination", "autonomy", "decision-making"],
                ),
            ],
        }
    }

    pub fn from_rules(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Labels of every rule that fires, in table order; never empty.
    pub fn categorize(&self, combined: &[String]) -> Vec<String> {
        let mut labels: Vec<String> = self
            .rules
            .iter()
            .filter(|r| r.fires(combined))
            .map(|r| r.label.clone())
            .collect();

        if labels.is_empty() {
            labels.push(UNCATEGORIZED.to_string());
        }
        labels
    }
}
