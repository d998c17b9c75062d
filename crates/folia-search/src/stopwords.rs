//! Stopword filtering.
//!
//! Common words ("le", "de", "et", ...) are excluded from the vocabulary,
//! from snippet term extraction, and from fuzzy/autocomplete stems. The word
//! lists come from the `stop-words` crate; both the raw and the
//! accent-stripped form of every word are loaded so the check also works on
//! normalized tokens ("été" and "ete" are both stopwords).
//!
//! # Example
//!
//! ```rust
//! use folia_search::stopwords::StopwordFilter;
//! use folia_search::SearchConfig;
//!
//! let filter = StopwordFilter::new(&SearchConfig::default());
//!
//! assert!(filter.is_stopword("les"));
//! assert!(!filter.is_stopword("sécurité"));
//! ```

use std::collections::HashSet;

use stop_words::{LANGUAGE, get};

use crate::normalize::normalize;
use crate::types::SearchConfig;

/// Minimum character count for a token to enter the vocabulary or count as a
/// query term.
pub const MIN_TOKEN_LEN: usize = 3;

/// Stopword filter shared by indexing, snippets, and suggestions.
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl StopwordFilter {
    /// Build a filter from configuration.
    ///
    /// Unknown languages fall back to French, the language of the corpora
    /// this subsystem ships with.
    pub fn new(config: &SearchConfig) -> Self {
        let language = match config.language.to_lowercase().as_str() {
            "fr" | "french" => LANGUAGE::French,
            "en" | "english" => LANGUAGE::English,
            other => {
                log::warn!("unsupported stopword language {other:?}, using French");
                LANGUAGE::French
            }
        };

        let mut stopwords = HashSet::new();
        for word in get(language) {
            stopwords.insert(normalize(&word));
            stopwords.insert(word.to_lowercase());
        }
        for word in &config.custom_stopwords {
            stopwords.insert(normalize(word));
            stopwords.insert(word.to_lowercase());
        }

        Self { stopwords }
    }

    /// Check if a word is a stopword (case- and accent-insensitive).
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&normalize(word))
    }

    /// Whether a whitespace token qualifies as an index/query term: longer
    /// than [`MIN_TOKEN_LEN`] − 1 characters and not a stopword.
    pub fn is_indexable_token(&self, token: &str) -> bool {
        token.chars().count() >= MIN_TOKEN_LEN && !self.is_stopword(token)
    }

    /// Number of loaded stopword entries.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }
}

impl std::fmt::Debug for StopwordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordFilter")
            .field("stopword_count", &self.stopwords.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
