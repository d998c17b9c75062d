//! Common types for the search crate.
//!
//! Wire types use camelCase field names so results and options pass through
//! to the viewer application unchanged.

use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// The embedding application provides this once when constructing the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Stopword language: "fr" or "en".
    #[serde(default = "default_language")]
    pub language: String,

    /// Additional stopwords on top of the language list.
    #[serde(default)]
    pub custom_stopwords: Vec<String>,

    /// Attempt one fuzzy-corrected re-query when a ranked search finds
    /// nothing.
    #[serde(default = "default_true")]
    pub fuzzy_enabled: bool,

    /// Clear previously indexed pages and vocabulary before loading a
    /// corpus. When `false`, repeated loads accumulate.
    #[serde(default = "default_true")]
    pub reset_on_load: bool,
}

fn default_language() -> String {
    "fr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            custom_stopwords: Vec::new(),
            fuzzy_enabled: default_true(),
            reset_on_load: default_true(),
        }
    }
}

/// Per-query options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Maximum results to return.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Compute snippet and highlighted snippet for each result.
    #[serde(default = "default_true")]
    pub include_snippets: bool,

    /// Snippet window budget in characters.
    #[serde(default = "default_snippet_length")]
    pub snippet_length: usize,
}

fn default_limit() -> usize {
    8
}

fn default_snippet_length() -> usize {
    180
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            include_snippets: default_true(),
            snippet_length: default_snippet_length(),
        }
    }
}

/// A single search result.
///
/// Constructed fresh per query; never stored by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Page identifier.
    pub id: u64,

    /// 1-based page number, the jump target in the viewer.
    pub page_number: u32,

    /// Display title ("Page {n}").
    pub title: String,

    /// Context window around the first match, without markup.
    pub snippet: String,

    /// Same window with every query-term match wrapped in `<mark>` tags.
    pub highlighted_snippet: String,

    /// Accumulated field score (ranked search) or the flat boolean-filter
    /// score.
    pub score: u32,

    /// OCR confidence of the page, in percent.
    pub confidence: f32,
}

/// Statistics returned by a corpus load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStats {
    /// Pages present in the corpus.
    pub total_pages: usize,

    /// Pages actually indexed (no error marker, non-empty text).
    pub indexed_pages: usize,

    /// Distinct vocabulary words after the load.
    pub vocabulary_size: usize,

    /// Wall-clock load time in milliseconds.
    pub elapsed_ms: u64,
}

// ============================================================================
// Tests
// ============================================================================
