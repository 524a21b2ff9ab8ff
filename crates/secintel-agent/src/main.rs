//! SecIntel — arXiv LLM-security paper intelligence.
//! Entry point for the agent binary.

mod config;

use std::sync::Arc;

use clap::Parser;
use rand::Rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use secintel_common::RetryPolicy;
use secintel_db::{BatchOutcome, PaperStore, StoredPaper};
use secintel_ingestion::sources::arxiv::ArxivClient;
use secintel_ingestion::webpage::{TextFetcher, WebTextFetcher};
use secintel_ingestion::{Enricher, SearchSource};
use secintel_llm::{LlmBackend, OpenAiCompatibleBackend, Summarizer};
use secintel_nlp::{KeywordExtractor, SecurityLexicon};
use secintel_ranker::RuleTable;

/// Fetch, enrich and store arXiv papers on LLM security.
#[derive(Parser)]
#[command(name = "secintel", version, about, long_about = None)]
struct Cli {
    /// Display the contents of the database instead of fetching
    #[arg(long)]
    display: bool,

    /// Filter displayed papers by a keyword substring
    #[arg(long)]
    filter_keyword: Option<String>,

    /// Maximum number of results to fetch per search term
    #[arg(long)]
    max_results: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("secintel=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::Config::load()?;

    let mut store = PaperStore::open(&config.database.path)?;
    store.setup()?;

    if cli.display {
        let rows = match &cli.filter_keyword {
            Some(keyword) => {
                println!("\nFiltered Summary of Papers Collected:");
                store.list_filtered(keyword)?
            }
            None => {
                println!("\nSummary of Papers Collected:");
                store.list_all()?
            }
        };
        print_report(&rows);
        return Ok(());
    }

    info!("SecIntel starting up, version {}", env!("CARGO_PKG_VERSION"));
    let max_results = cli.max_results.unwrap_or(config.search.max_results);

    // Every service is built once and shared across the run.
    let retry = RetryPolicy::network();
    let extractor = KeywordExtractor::new(&SecurityLexicon::builtin())?;
    let backend: Arc<dyn LlmBackend> = Arc::new(OpenAiCompatibleBackend::new(
        &config.llm.base_url,
        &config.llm.model,
        config.llm_api_key(),
    ));
    info!(model = %config.llm.model, base_url = %config.llm.base_url, "summarization backend ready");
    let summarizer = Summarizer::new(backend, retry.clone());
    let fetcher: Arc<dyn TextFetcher> = Arc::new(WebTextFetcher::new(retry.clone())?);
    let enricher = Enricher::new(
        extractor,
        RuleTable::builtin(),
        summarizer,
        fetcher,
        config.nlp.max_keywords,
    );
    let source = ArxivClient::new(retry)?;

    for term in &config.search.terms {
        info!(term = %term, "fetching papers for search term");
        match run_term(&source, &enricher, &mut store, term, max_results, &config).await {
            Ok(outcome) => {
                info!(
                    term = %term,
                    inserted = outcome.inserted,
                    duplicates = outcome.duplicates,
                    "search term complete"
                );
            }
            Err(e) => {
                error!(term = %term, "failed to fetch or store papers: {e}");
            }
        }

        // Politeness delay between terms to stay friendly with the API.
        let secs = rand::thread_rng()
            .gen_range(config.search.delay_min_secs..=config.search.delay_max_secs);
        tokio::time::sleep(std::time::Duration::from_secs_f64(secs)).await;
    }

    info!(total = store.count()?, "run complete");
    Ok(())
}

/// One search term, end to end: fetch → enrich each → persist batch.
async fn run_term(
    source: &ArxivClient,
    enricher: &Enricher,
    store: &mut PaperStore,
    term: &str,
    max_results: usize,
    config: &config::Config,
) -> anyhow::Result<BatchOutcome> {
    let papers = source
        .search(term, max_results, config.search.start_date)
        .await?;
    info!(n = papers.len(), "papers retrieved");

    let enriched = enricher.enrich_batch(&papers).await;
    let outcome = store.insert_batch(&enriched)?;
    Ok(outcome)
}

fn print_report(rows: &[StoredPaper]) {
    println!("--------------------------------------");
    for row in rows {
        let p = &row.paper;
        println!("Title: {}", p.title);
        println!("Authors: {}", p.authors);
        println!("Publication Date: {}", p.publication_date);
        println!("Category: {}", p.category);
        println!("Relevance Score: {}", p.relevance_score);
        println!("Summary: {}", p.summary);
        println!("LLM Summary: {}", p.llm_summary.as_deref().unwrap_or("-"));
        println!(
            "Full Text Summary: {}",
            p.full_text_summary.as_deref().unwrap_or("-")
        );
        println!("Keywords: {}", p.keywords);
        println!();
    }
}
