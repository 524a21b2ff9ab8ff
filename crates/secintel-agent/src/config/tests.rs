use super::*;

#[test]
fn test_defaults_are_complete() {
    let c = Config::default();
    assert_eq!(c.search.terms.len(), 13);
    assert_eq!(c.search.max_results, 10);
    assert_eq!(c.search.start_date, None);
    assert!(c.search.delay_min_secs < c.search.delay_max_secs);
    assert_eq!(c.database.path, "arxiv_papers.db");
    assert_eq!(c.nlp.max_keywords, 10);
}

#[test]
fn test_partial_toml_fills_in_defaults() {
    let raw = r#"
        [search]
        terms = ["LLM security"]
        max_results = 25

        [llm]
        model = "qwen2.5:14b"
    "#;
    let c: Config = toml::from_str(raw).unwrap();
    assert_eq!(c.search.terms, vec!["LLM security"]);
    assert_eq!(c.search.max_results, 25);
    assert_eq!(c.search.delay_min_secs, 3.0);
    assert_eq!(c.llm.model, "qwen2.5:14b");
    assert_eq!(c.llm.base_url, "http://localhost:11434");
    assert_eq!(c.database.path, "arxiv_papers.db");
}

#[test]
fn test_start_date_parses() {
    let raw = r#"
        [search]
        start_date = "2024-01-15"
    "#;
    let c: Config = toml::from_str(raw).unwrap();
    assert_eq!(
        c.search.start_date,
        Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    );
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let c = Config::load_from(dir.path().join("nope.toml")).unwrap();
    assert_eq!(c.search.max_results, 10);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secintel.toml");
    std::fs::write(&path, "[database]\npath = \"/tmp/papers.db\"\n").unwrap();
    let c = Config::load_from(&path).unwrap();
    assert_eq!(c.database.path, "/tmp/papers.db");
}
