//! Configuration loading for SecIntel.
//! Reads secintel.toml from the current directory or the path in the
//! SECINTEL_CONFIG env var; a missing file means builtin defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub nlp: NlpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_terms")]
    pub terms: Vec<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Optional submittedDate lower bound passed to the search API.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Politeness delay between search terms, uniform in [min, max] seconds.
    #[serde(default = "default_delay_min")]
    pub delay_min_secs: f64,
    #[serde(default = "default_delay_max")]
    pub delay_max_secs: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            terms: default_terms(),
            max_results: default_max_results(),
            start_date: None,
            delay_min_secs: default_delay_min(),
            delay_max_secs: default_delay_max(),
        }
    }
}

fn default_terms() -> Vec<String> {
    [
        "LLM security",
        "language model vulnerabilities",
        "adversarial attacks on language models",
        "text perturbation",
        "multimodal adversarial attacks",
        "RAG security",
        "LLM jailbreak",
        "data leakage",
        "training data privacy",
        "AI agent vulnerabilities",
        "data poisoning LLM",
        "model alignment vulnerabilities",
        "robustness against prompt injection",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_max_results() -> usize { 10 }
fn default_delay_min() -> f64 { 3.0 }
fn default_delay_max() -> f64 { 6.0 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path() }
    }
}

fn default_db_path() -> String { "arxiv_papers.db".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Any OpenAI-compatible endpoint (Ollama, LMStudio, vLLM, hosted).
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Falls back to SECINTEL_LLM_API_KEY when unset.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            api_key: None,
        }
    }
}

fn default_llm_base_url() -> String { "http://localhost:11434".to_string() }
fn default_llm_model() -> String { "llama3:8b".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self { max_keywords: default_max_keywords() }
    }
}

fn default_max_keywords() -> usize { 10 }

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("SECINTEL_CONFIG")
            .unwrap_or_else(|_| "secintel.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using builtin defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// The LLM API key, from config or environment.
    pub fn llm_api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .or_else(|| std::env::var("SECINTEL_LLM_API_KEY").ok())
    }
}

#[cfg(test)]
mod tests;
