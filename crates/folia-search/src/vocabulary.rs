//! The indexable-word vocabulary.
//!
//! Accumulates every normalized token admitted during corpus load. The set
//! only grows while loading and is read-only during search; it backs fuzzy
//! correction and autocomplete, never primary ranking.
//!
//! A `BTreeSet` keeps iteration alphabetical, so equal-distance fuzzy
//! candidates and equal-score completions resolve the same way on every run.

use std::collections::BTreeSet;

/// Set of normalized, stopword-free tokens observed across all pages.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: BTreeSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a normalized word.
    pub fn insert(&mut self, word: impl Into<String>) {
        self.words.insert(word.into());
    }

    /// Check if a normalized word is present.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Iterate words in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Remove all words.
    pub fn clear(&mut self) {
        self.words.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
