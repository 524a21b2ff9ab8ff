//! arXiv API client.
//!
//! One endpoint: http://export.arxiv.org/api/query returning an Atom feed.
//! Queries are `all:{term}` with an optional submittedDate lower bound,
//! sorted by submission date descending.

use async_trait::async_trait;
use chrono::NaiveDate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use secintel_common::RetryPolicy;

use super::SearchSource;
use crate::models::RawPaper;

const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

pub struct ArxivClient {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ArxivClient {
    pub fn new(retry: RetryPolicy) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("secintel/0.1 (research)")
            .build()?;
        Ok(Self { client, retry })
    }

    fn build_query(term: &str, start_date: Option<NaiveDate>) -> String {
        let mut query = format!("all:{term}");
        if let Some(date) = start_date {
            query.push_str(&format!(" AND submittedDate:[{} TO *]", date.format("%Y-%m-%d")));
        }
        query
    }
}

#[async_trait]
impl SearchSource for ArxivClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        start_date: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<RawPaper>> {
        let search_query = Self::build_query(query, start_date);
        let max_results = max_results.to_string();
        let params = [
            ("search_query", search_query.as_str()),
            ("start", "0"),
            ("max_results", max_results.as_str()),
            ("sortBy", "submittedDate"),
            ("sortOrder", "descending"),
        ];

        let xml = self
            .retry
            .run("arXiv search", || async {
                self.client
                    .get(ARXIV_API_URL)
                    .query(&params)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await
            })
            .await?;

        let papers = parse_arxiv_feed(&xml)?;
        debug!(query = %search_query, n = papers.len(), "arXiv search returned papers");
        Ok(papers)
    }
}

/// Parse an arXiv Atom feed into RawPaper records.
/// Handles the <feed><entry> structure; feed-level title/id/link elements
/// are ignored because no entry is open yet.
fn parse_arxiv_feed(xml: &str) -> anyhow::Result<Vec<RawPaper>> {
    let mut papers = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // State machine for XML parsing
    let mut current: Option<RawPaper> = None;
    let mut in_title     = false;
    let mut in_summary   = false;
    let mut in_published = false;
    let mut in_author    = false;
    let mut in_name      = false;
    let mut in_id        = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                match e.name().as_ref() {
                    b"entry" => {
                        current = Some(RawPaper {
                            title: String::new(),
                            authors: vec![],
                            abstract_text: String::new(),
                            publication_date: String::new(),
                            pdf_link: None,
                            web_link: String::new(),
                        });
                    }
                    b"title"     => in_title = true,
                    b"summary"   => in_summary = true,
                    b"published" => in_published = true,
                    b"author"    => in_author = true,
                    b"name"      => in_name = true,
                    b"id"        => in_id = true,
                    b"link" => {
                        if let Some(ref mut p) = current {
                            apply_link(e, p);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                // Atom links are usually self-closing.
                if e.name().as_ref() == b"link" {
                    if let Some(ref mut p) = current {
                        apply_link(e, p);
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if let Some(ref mut p) = current {
                    if in_title     { p.title = text.clone(); }
                    if in_summary   { p.abstract_text = text.clone(); }
                    if in_published { p.publication_date = text.clone(); }
                    if in_id        { p.web_link = text.clone(); }
                    if in_author && in_name {
                        p.authors.push(text.clone());
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                match e.name().as_ref() {
                    b"title"     => in_title = false,
                    b"summary"   => in_summary = false,
                    b"published" => in_published = false,
                    b"author"    => in_author = false,
                    b"name"      => in_name = false,
                    b"id"        => in_id = false,
                    b"entry" => {
                        if let Some(p) = current.take() {
                            if !p.title.is_empty() {
                                papers.push(p);
                            } else {
                                warn!("Skipping entry with empty title");
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("XML parse error: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(papers)
}

/// Pick the first link advertised as a PDF.
fn apply_link(e: &BytesStart, paper: &mut RawPaper) {
    let mut href = None;
    let mut media_type = None;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"href" => href = Some(String::from_utf8_lossy(&attr.value).to_string()),
            b"type" => media_type = Some(String::from_utf8_lossy(&attr.value).to_string()),
            _ => {}
        }
    }
    if media_type.as_deref() == Some("application/pdf") && paper.pdf_link.is_none() {
        paper.pdf_link = href;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_plain() {
        let q = ArxivClient::build_query("LLM security", None);
        assert_eq!(q, "all:LLM security");
    }

    #[test]
    fn test_build_query_with_start_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let q = ArxivClient::build_query("RAG security", Some(date));
        assert_eq!(q, "all:RAG security AND submittedDate:[2024-01-15 TO *]");
    }

    #[test]
    fn test_parse_minimal_atom_feed() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=all:LLM security</title>
  <id>http://arxiv.org/api/feedid</id>
  <entry>
    <id>http://arxiv.org/abs/2406.00001v1</id>
    <title>Prompt Injection in the Wild</title>
    <summary>We study prompt injection against deployed assistants.</summary>
    <published>2024-06-01T12:00:00Z</published>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
    <link href="http://arxiv.org/abs/2406.00001v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2406.00001v1" rel="related" type="application/pdf"/>
  </entry>
</feed>"#;

        let papers = parse_arxiv_feed(xml).unwrap();
        assert_eq!(papers.len(), 1);
        let p = &papers[0];
        assert_eq!(p.title, "Prompt Injection in the Wild");
        assert_eq!(p.authors, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(p.authors_joined(), "Ada Lovelace, Alan Turing");
        assert_eq!(p.abstract_text, "We study prompt injection against deployed assistants.");
        assert_eq!(p.publication_date, "2024-06-01T12:00:00Z");
        assert_eq!(p.web_link, "http://arxiv.org/abs/2406.00001v1");
        assert_eq!(p.pdf_link.as_deref(), Some("http://arxiv.org/pdf/2406.00001v1"));
    }

    #[test]
    fn test_feed_level_elements_are_ignored() {
        let xml = r#"<feed><title>Feed title</title><id>feed-id</id></feed>"#;
        let papers = parse_arxiv_feed(xml).unwrap();
        assert!(papers.is_empty());
    }

    #[test]
    fn test_entry_with_empty_title_is_skipped() {
        let xml = r#"<feed>
  <entry>
    <id>http://arxiv.org/abs/2406.00002v1</id>
    <summary>Orphan abstract.</summary>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2406.00003v1</id>
    <title>Kept</title>
  </entry>
</feed>"#;
        let papers = parse_arxiv_feed(xml).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Kept");
    }
}
