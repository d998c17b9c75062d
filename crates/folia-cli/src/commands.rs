//! Command implementations.
//!
//! Each command loads the corpus fresh, runs one operation, and prints
//! either human-readable lines or pretty JSON.

use std::path::Path;

use folia_search::{ParsedQuery, SearchConfig, SearchOptions, load_engine};

use crate::error::Result;

/// Run a query and print results.
pub async fn search(
    corpus: &Path,
    query: &str,
    options: &SearchOptions,
    json: bool,
) -> Result<()> {
    let engine = load_engine(corpus, SearchConfig::default()).await?;
    let results = engine.query(query, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results for {query:?}");
        let suggestion = engine.suggestion(query);
        if suggestion != query {
            println!("Did you mean: {suggestion}?");
        }
        return Ok(());
    }

    for (rank, hit) in results.iter().enumerate() {
        println!(
            "{:2}. {}  (score {}, confidence {:.1}%)",
            rank + 1,
            hit.title,
            hit.score,
            hit.confidence
        );
        if !hit.snippet.is_empty() {
            println!("    {}", hit.snippet);
        }
    }
    Ok(())
}

/// Show how a query classifies and parses.
pub fn parse(query: &str, json: bool) -> Result<()> {
    let parsed = ParsedQuery::parse(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        let kind = if parsed.is_advanced() {
            "advanced"
        } else {
            "simple"
        };
        println!("{kind}: {}", parsed.readable());
    }
    Ok(())
}

/// Print the corrected query and the alternative candidates.
pub async fn suggest(corpus: &Path, query: &str) -> Result<()> {
    let engine = load_engine(corpus, SearchConfig::default()).await?;

    let suggestion = engine.suggestion(query);
    if suggestion == query {
        println!("No correction for {query:?}");
    } else {
        println!("Suggestion: {suggestion}");
    }

    let alternatives = engine.alternative_suggestions(query);
    if !alternatives.is_empty() {
        println!("Alternatives: {}", alternatives.join(", "));
    }
    Ok(())
}

/// Print completions for the last word of a partial query.
pub async fn complete(corpus: &Path, partial: &str, limit: usize) -> Result<()> {
    let engine = load_engine(corpus, SearchConfig::default()).await?;
    let suggestions = engine.autocomplete(partial, limit);

    if suggestions.is_empty() {
        println!("No completions for {partial:?}");
    } else {
        for suggestion in suggestions {
            println!("{suggestion}");
        }
    }
    Ok(())
}

/// Print corpus and index statistics.
pub async fn stats(corpus: &Path, json: bool) -> Result<()> {
    let parsed = folia_core::Corpus::from_path(corpus).await?;
    let mut engine = folia_search::SearchEngine::new(SearchConfig::default());
    let stats = engine.load_corpus(&parsed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Pages:            {}", stats.total_pages);
    println!("Indexed:          {}", stats.indexed_pages);
    println!("Vocabulary words: {}", stats.vocabulary_size);
    println!("Load time:        {}ms", stats.elapsed_ms);
    if let Some(language) = &parsed.metadata.language {
        println!("Language:         {language}");
    }
    println!("Avg confidence:   {:.1}%", parsed.metadata.avg_confidence);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_corpus(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("corpus.json");
        let json = r#"{
            "metadata": { "totalPages": 1, "successful": 1, "failed": 0 },
            "pages": [
                { "id": 1, "pageNumber": 1, "filename": "page-001.png",
                  "text": "Gouvernance et éthique", "confidence": 92.0 }
            ]
        }"#;
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_search_command_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_corpus(&dir);
        let options = SearchOptions::default();
        assert!(search(&path, "gouvernance", &options, false).await.is_ok());
        assert!(search(&path, "gouvernance", &options, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_search_command_missing_corpus_fails() {
        let options = SearchOptions::default();
        let result = search(Path::new("/nonexistent.json"), "durable", &options, false).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_command_runs() {
        assert!(parse("formation AND sécurité", false).is_ok());
        assert!(parse("formation AND sécurité", true).is_ok());
    }

    #[tokio::test]
    async fn test_stats_command_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_corpus(&dir);
        assert!(stats(&path, false).await.is_ok());
        assert!(stats(&path, true).await.is_ok());
    }
}
