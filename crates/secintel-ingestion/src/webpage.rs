//! Webpage-fetch collaborator: extended text for full-text summaries.
//!
//! Never raises to the caller. Transport failure after retries maps to
//! `None`; a reachable page without the expected abstract block maps to
//! an empty string, which the pipeline treats as "nothing to summarize".

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::error;

use secintel_common::RetryPolicy;

/// Supplies extended text for a paper's landing page, or `None` on failure.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch(&self, web_link: &str) -> Option<String>;
}

/// HTTP fetcher for arXiv abs pages, which carry the abstract in
/// `blockquote.abstract`.
pub struct WebTextFetcher {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl WebTextFetcher {
    pub fn new(retry: RetryPolicy) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("secintel/0.1 (research)")
            .build()?;
        Ok(Self { client, retry })
    }
}

#[async_trait]
impl TextFetcher for WebTextFetcher {
    async fn fetch(&self, web_link: &str) -> Option<String> {
        let html = match self
            .retry
            .run("webpage fetch", || async {
                self.client
                    .get(web_link)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await
            })
            .await
        {
            Ok(html) => html,
            Err(e) => {
                error!(web_link, "failed to fetch webpage: {e}");
                return None;
            }
        };

        Some(extract_abstract(&html))
    }
}

fn extract_abstract(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse("blockquote.abstract").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
