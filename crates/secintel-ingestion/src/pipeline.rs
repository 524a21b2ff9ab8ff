//! Enrichment pipeline.
//!
//! Per raw record:
//!   1. Extract entities/keywords from the abstract
//!   2. Categorize and score from that output
//!   3. Copy the abstract into the summary column
//!   4. Summarize the abstract
//!   5. Fetch extended text from the landing page and summarize it too,
//!      degrading to no full-text summary when either step comes up empty
//!   6. Assemble the storable record
//!
//! A failure on one record is logged and skipped; the batch continues.

use std::sync::Arc;

use tracing::{debug, info, warn};

use secintel_db::EnrichedPaper;
use secintel_llm::Summarizer;
use secintel_nlp::KeywordExtractor;
use secintel_ranker::{relevance_score, RuleTable};

use crate::models::RawPaper;
use crate::webpage::TextFetcher;

/// Composes the enrichment services. Every service is constructed once by
/// the caller and shared for the run; the pipeline owns no global state.
pub struct Enricher {
    extractor: KeywordExtractor,
    rules: RuleTable,
    summarizer: Summarizer,
    fetcher: Arc<dyn TextFetcher>,
    max_keywords: usize,
}

impl Enricher {
    pub fn new(
        extractor: KeywordExtractor,
        rules: RuleTable,
        summarizer: Summarizer,
        fetcher: Arc<dyn TextFetcher>,
        max_keywords: usize,
    ) -> Self {
        Self { extractor, rules, summarizer, fetcher, max_keywords }
    }

    /// Enrich one raw record.
    pub async fn enrich(&self, raw: &RawPaper) -> anyhow::Result<EnrichedPaper> {
        let keyword_set = self.extractor.extract(&raw.abstract_text, self.max_keywords);
        let combined = keyword_set.combined();

        let categories = self.rules.categorize(&combined);
        let score = relevance_score(
            &raw.abstract_text,
            &keyword_set.keywords,
            &keyword_set.entities,
        );

        let llm_summary = self.summarizer.summarize(&raw.abstract_text).await;

        let full_text_summary = if raw.web_link.is_empty() {
            None
        } else {
            match self.fetcher.fetch(&raw.web_link).await {
                Some(text) if !text.trim().is_empty() => {
                    let summary = self.summarizer.summarize(&text).await;
                    if summary.is_none() {
                        warn!(title = %raw.title, "full text summarization failed");
                    }
                    summary
                }
                _ => {
                    debug!(title = %raw.title, "no extended text available, using abstract only");
                    None
                }
            }
        };

        Ok(EnrichedPaper {
            title: raw.title.clone(),
            authors: raw.authors_joined(),
            abstract_text: raw.abstract_text.clone(),
            publication_date: raw.publication_date.clone(),
            category: categories.join(", "),
            relevance_score: score,
            // Deliberate pass-through: the summary column carries the abstract.
            summary: raw.abstract_text.clone(),
            llm_summary,
            pdf_link: raw.pdf_link.clone(),
            full_text_summary,
            keywords: keyword_set.joined(),
        })
    }

    /// Enrich a batch sequentially. A record that fails is logged and
    /// dropped; the rest of the batch is unaffected.
    pub async fn enrich_batch(&self, papers: &[RawPaper]) -> Vec<EnrichedPaper> {
        let mut enriched = Vec::with_capacity(papers.len());
        for paper in papers {
            match self.enrich(paper).await {
                Ok(p) => enriched.push(p),
                Err(e) => {
                    warn!(title = %paper.title, "failed to enrich paper: {e}");
                }
            }
        }
        info!(
            enriched = enriched.len(),
            failed = papers.len() - enriched.len(),
            "batch enrichment complete"
        );
        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use secintel_common::RetryPolicy;
    use secintel_llm::{LlmBackend, LlmError, LlmRequest, LlmResponse};
    use secintel_nlp::SecurityLexicon;

    struct EchoBackend;

    #[async_trait]
    impl LlmBackend for EchoBackend {
        async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
            let input = &req.messages.last().unwrap().content;
            Ok(LlmResponse {
                content: format!("summary of: {}", &input[..input.len().min(20)]),
                model: "echo".to_string(),
                prompt_tokens: 0,
                completion_tokens: 0,
            })
        }
        fn model_id(&self) -> &str { "echo" }
    }

    struct DownBackend;

    #[async_trait]
    impl LlmBackend for DownBackend {
        async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
            Err(LlmError::Unavailable("down".to_string()))
        }
        fn model_id(&self) -> &str { "down" }
    }

    struct FixedFetcher(Option<String>);

    #[async_trait]
    impl TextFetcher for FixedFetcher {
        async fn fetch(&self, _web_link: &str) -> Option<String> {
            self.0.clone()
        }
    }

    fn raw_paper() -> RawPaper {
        RawPaper {
            title: "Prompt Injection in the Wild".to_string(),
            authors: vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()],
            abstract_text: "Large language models are vulnerable to prompt injection \
                            and jailbreak attacks."
                .to_string(),
            publication_date: "2024-06-01T12:00:00Z".to_string(),
            pdf_link: Some("http://arxiv.org/pdf/2406.00001v1".to_string()),
            web_link: "http://arxiv.org/abs/2406.00001v1".to_string(),
        }
    }

    fn enricher(backend: Arc<dyn LlmBackend>, fetcher: Arc<dyn TextFetcher>) -> Enricher {
        let quick_retry =
            RetryPolicy::new(1, std::time::Duration::ZERO, std::time::Duration::ZERO);
        Enricher::new(
            KeywordExtractor::new(&SecurityLexicon::builtin()).unwrap(),
            RuleTable::builtin(),
            Summarizer::new(backend, quick_retry),
            fetcher,
            10,
        )
    }

    #[tokio::test]
    async fn test_enrich_assembles_full_record() {
        let e = enricher(
            Arc::new(EchoBackend),
            Arc::new(FixedFetcher(Some("Extended text about jailbreaks.".to_string()))),
        );
        let paper = e.enrich(&raw_paper()).await.unwrap();

        assert_eq!(paper.authors, "Ada Lovelace, Alan Turing");
        assert!(paper.category.contains("Prompt Injection"));
        assert!(paper.relevance_score > 0);
        assert_eq!(paper.summary, paper.abstract_text);
        assert!(paper.llm_summary.is_some());
        assert!(paper.full_text_summary.is_some());
        // Entities lead the stored keyword string.
        assert!(paper.keywords.starts_with("large language models"));
    }

    #[tokio::test]
    async fn test_dead_web_link_degrades_gracefully() {
        let e = enricher(Arc::new(EchoBackend), Arc::new(FixedFetcher(None)));
        let paper = e.enrich(&raw_paper()).await.unwrap();

        assert_eq!(paper.full_text_summary, None);
        assert!(paper.llm_summary.is_some());
    }

    #[tokio::test]
    async fn test_empty_fetched_text_skips_second_summary() {
        let e = enricher(
            Arc::new(EchoBackend),
            Arc::new(FixedFetcher(Some(String::new()))),
        );
        let paper = e.enrich(&raw_paper()).await.unwrap();
        assert_eq!(paper.full_text_summary, None);
    }

    #[tokio::test]
    async fn test_backend_failure_yields_null_summaries_not_errors() {
        let e = enricher(
            Arc::new(DownBackend),
            Arc::new(FixedFetcher(Some("Extended text.".to_string()))),
        );
        let paper = e.enrich(&raw_paper()).await.unwrap();
        assert_eq!(paper.llm_summary, None);
        assert_eq!(paper.full_text_summary, None);
        // Enrichment still succeeds; the record remains storable.
        assert!(!paper.category.is_empty());
    }

    #[tokio::test]
    async fn test_blank_web_link_skips_fetch() {
        let mut raw = raw_paper();
        raw.web_link = String::new();
        let e = enricher(Arc::new(EchoBackend), Arc::new(FixedFetcher(Some("text".into()))));
        let paper = e.enrich(&raw).await.unwrap();
        assert_eq!(paper.full_text_summary, None);
    }

    #[tokio::test]
    async fn test_batch_enrichment_preserves_order() {
        let e = enricher(Arc::new(EchoBackend), Arc::new(FixedFetcher(None)));
        let mut second = raw_paper();
        second.title = "A Second Paper".to_string();
        let enriched = e.enrich_batch(&[raw_paper(), second]).await;
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].title, "Prompt Injection in the Wild");
        assert_eq!(enriched[1].title, "A Second Paper");
    }
}
