//! Paper store over a single SQLite connection.

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode};
use tracing::{debug, info};

use crate::error::Result;
use crate::schema::{EnrichedPaper, StoredPaper};

const CREATE_PAPERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS papers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        authors TEXT NOT NULL,
        abstract TEXT NOT NULL,
        publication_date TEXT NOT NULL,
        category TEXT NOT NULL,
        relevance_score INTEGER NOT NULL,
        summary TEXT NOT NULL,
        llm_summary TEXT,
        pdf_link TEXT,
        full_text_summary TEXT,
        keywords TEXT NOT NULL,
        UNIQUE(title, authors, publication_date)
    )";

const INSERT_PAPER: &str = "
    INSERT INTO papers (
        title, authors, abstract, publication_date, category,
        relevance_score, summary, llm_summary, pdf_link,
        full_text_summary, keywords
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

const SELECT_PAPERS: &str = "
    SELECT id, title, authors, abstract, publication_date, category,
           relevance_score, summary, llm_summary, pdf_link,
           full_text_summary, keywords
    FROM papers";

/// Per-batch insert summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub inserted: usize,
    pub duplicates: usize,
}

/// All writes go through one connection; the pipeline has a single logical
/// worker, so no pooling or locking layer is needed.
pub struct PaperStore {
    conn: Connection,
}

impl PaperStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Idempotently ensure the schema exists. The `case_sensitive_like`
    /// pragma makes keyword filtering case-sensitive (SQLite's ASCII
    /// default is not).
    pub fn setup(&self) -> Result<()> {
        self.conn.execute(CREATE_PAPERS_TABLE, [])?;
        self.conn.pragma_update(None, "case_sensitive_like", true)?;
        debug!("papers table ready");
        Ok(())
    }

    /// Insert a batch inside one transaction, committed once. Rows that
    /// collide on (title, authors, publication_date) are logged and
    /// skipped; any other failure rolls the whole batch back.
    pub fn insert_batch(&mut self, papers: &[EnrichedPaper]) -> Result<BatchOutcome> {
        let tx = self.conn.transaction()?;
        let mut outcome = BatchOutcome::default();

        for paper in papers {
            let result = tx.execute(
                INSERT_PAPER,
                params![
                    paper.title,
                    paper.authors,
                    paper.abstract_text,
                    paper.publication_date,
                    paper.category,
                    paper.relevance_score,
                    paper.summary,
                    paper.llm_summary,
                    paper.pdf_link,
                    paper.full_text_summary,
                    paper.keywords,
                ],
            );
            match result {
                Ok(_) => outcome.inserted += 1,
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    info!(title = %paper.title, "paper already stored, skipping duplicate");
                    outcome.duplicates += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit()?;
        Ok(outcome)
    }

    pub fn list_all(&self) -> Result<Vec<StoredPaper>> {
        let mut stmt = self.conn.prepare(SELECT_PAPERS)?;
        let rows = stmt.query_map([], row_to_paper)?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    /// Case-sensitive substring match over the stored keywords column.
    /// `LIKE` wildcards in `keyword` pass through unescaped.
    pub fn list_filtered(&self, keyword: &str) -> Result<Vec<StoredPaper>> {
        let sql = format!("{SELECT_PAPERS} WHERE keywords LIKE ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let pattern = format!("%{keyword}%");
        let rows = stmt.query_map(params![pattern], row_to_paper)?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    pub fn count(&self) -> Result<u64> {
        let n: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM papers", [], |row| row.get(0))?;
        Ok(n)
    }
}

fn row_to_paper(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredPaper> {
    Ok(StoredPaper {
        id: row.get(0)?,
        paper: EnrichedPaper {
            title: row.get(1)?,
            authors: row.get(2)?,
            abstract_text: row.get(3)?,
            publication_date: row.get(4)?,
            category: row.get(5)?,
            relevance_score: row.get(6)?,
            summary: row.get(7)?,
            llm_summary: row.get(8)?,
            pdf_link: row.get(9)?,
            full_text_summary: row.get(10)?,
            keywords: row.get(11)?,
        },
    })
}
