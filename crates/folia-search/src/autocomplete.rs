//! Autocomplete over the vocabulary.
//!
//! Completes the last word of a partial query from the indexed vocabulary.
//! Prefix matches outrank containment matches, shorter completions outrank
//! longer ones, and suggestions re-attach the untouched leading words so
//! only the word being typed changes.
//!
//! # Example
//!
//! ```rust
//! use folia_search::autocomplete::complete;
//! use folia_search::stopwords::StopwordFilter;
//! use folia_search::vocabulary::Vocabulary;
//! use folia_search::SearchConfig;
//!
//! let mut vocab = Vocabulary::new();
//! vocab.insert("gouvernance");
//! let filter = StopwordFilter::new(&SearchConfig::default());
//!
//! let suggestions = complete("rapport gouv", &vocab, &filter, 5);
//! assert_eq!(suggestions, vec!["rapport gouvernance"]);
//! ```

use folia_core::util::text::{char_len, last_word, leading_words};

use crate::normalize::normalize;
use crate::stopwords::StopwordFilter;
use crate::vocabulary::Vocabulary;

/// Default number of suggestions.
pub const DEFAULT_LIMIT: usize = 5;

/// Score for a prefix match of the given word and stem lengths.
fn prefix_score(word_len: usize, stem_len: usize) -> i64 {
    100 - (word_len as i64 - stem_len as i64)
}

/// Score for a containment match at the given character position.
fn containment_score(position: usize) -> i64 {
    50 - position as i64
}

/// Suggest completions for the last word of `partial`.
///
/// Returns at most `limit` suggestions, best first. Stems shorter than two
/// characters or on the stopword list produce nothing.
pub fn complete(
    partial: &str,
    vocab: &Vocabulary,
    stopwords: &StopwordFilter,
    limit: usize,
) -> Vec<String> {
    let Some(stem) = last_word(partial) else {
        return Vec::new();
    };
    let norm_stem = normalize(stem);
    let stem_len = char_len(&norm_stem);
    if stem_len < 2 || stopwords.is_stopword(&norm_stem) {
        return Vec::new();
    }

    let mut scored: Vec<(i64, &str)> = Vec::new();
    for word in vocab.iter() {
        if word.starts_with(norm_stem.as_str()) {
            scored.push((prefix_score(char_len(word), stem_len), word));
        } else if let Some(byte_pos) = word.find(norm_stem.as_str()) {
            let position = word[..byte_pos].chars().count();
            scored.push((containment_score(position), word));
        }
    }

    // Stable sort keeps equal scores alphabetical (vocabulary order).
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let leading = leading_words(partial);
    scored
        .into_iter()
        .take(limit)
        .map(|(_, word)| {
            if leading.is_empty() {
                word.to_string()
            } else {
                format!("{leading} {word}")
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
