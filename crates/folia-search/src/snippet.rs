//! Snippet extraction and highlighting.
//!
//! A snippet is a window of the original page text centered on the first
//! query-term match, snapped to word boundaries and fitted with ellipses.
//! The highlighted variant wraps every term occurrence inside the window in
//! `<mark>` tags; stripping the tags always yields the plain snippet.
//!
//! All positions and budgets are counted in characters. Matching folds case
//! and diacritics one character at a time, so a query typed without accents
//! still lands on (and highlights) the accented original.

use regex::Regex;

use crate::normalize::{fold_char, fold_chars};
use crate::stopwords::StopwordFilter;

/// Opening highlight marker.
pub const HIGHLIGHT_OPEN: &str = "<mark>";

/// Closing highlight marker.
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

/// How far (in characters) the window edges travel to reach a space.
const BOUNDARY_LOOKAROUND: usize = 20;

/// An extracted snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    /// Window text, ellipses included, no markup.
    pub text: String,
    /// Window text with every term match wrapped in highlight markers.
    pub highlighted: String,
}

/// Extract a highlighted snippet for `query` from `text`.
///
/// Query terms are the whitespace tokens longer than two characters that are
/// not stopwords. With no usable term, or none occurring in the text, the
/// snippet is simply the head of the text.
pub fn extract(
    text: &str,
    query: &str,
    max_length: usize,
    stopwords: &StopwordFilter,
) -> Snippet {
    let terms: Vec<&str> = query
        .split_whitespace()
        .filter(|t| stopwords.is_indexable_token(t))
        .collect();

    let chars: Vec<char> = text.chars().collect();

    if terms.is_empty() {
        return head_snippet(&chars, max_length);
    }

    let folded: Vec<char> = fold_chars(text);
    let folded_terms: Vec<Vec<char>> = terms
        .iter()
        .map(|t| t.chars().map(fold_char).collect())
        .collect();

    let Some(match_idx) = folded_terms
        .iter()
        .filter_map(|term| find_sub(&folded, term))
        .min()
    else {
        return head_snippet(&chars, max_length);
    };

    // Center the budget on the match, half before and half after.
    let half = max_length / 2;
    let mut start = match_idx.saturating_sub(half);
    let mut end = (start + max_length).min(chars.len());

    // Snap both edges to the nearest space within the lookaround, so the
    // window never splits a word.
    if start > 0 {
        for j in (start.saturating_sub(BOUNDARY_LOOKAROUND)..=start).rev() {
            if chars[j] == ' ' {
                start = j + 1;
                break;
            }
        }
    }
    if end < chars.len() {
        for (j, &c) in chars.iter().enumerate().skip(end).take(BOUNDARY_LOOKAROUND) {
            if c == ' ' {
                end = j;
                break;
            }
        }
    }

    let window = &chars[start..end];
    let highlighted_core = highlight(window, &folded[start..end], &folded_terms);
    let core: String = window.iter().collect();

    let prefix = if start > 0 { "..." } else { "" };
    let suffix = if end < chars.len() { "..." } else { "" };

    Snippet {
        text: format!("{prefix}{core}{suffix}"),
        highlighted: format!("{prefix}{highlighted_core}{suffix}"),
    }
}

/// Head-of-text snippet used when there is nothing to center on.
fn head_snippet(chars: &[char], max_length: usize) -> Snippet {
    let taken: String = chars.iter().take(max_length).collect();
    let mut text = taken.trim().to_string();
    if chars.len() > max_length {
        text.push_str("...");
    }
    Snippet {
        highlighted: text.clone(),
        text,
    }
}

/// First occurrence of `needle` in `haystack`, by character index.
fn find_sub(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Wrap every term match inside the window with highlight markers.
///
/// Matching runs over the folded window through a single alternation of
/// escaped terms; match ranges are mapped back to the original characters,
/// so the marked text keeps its case and accents.
fn highlight(window: &[char], folded_window: &[char], folded_terms: &[Vec<char>]) -> String {
    let folded_text: String = folded_window.iter().collect();

    let pattern = folded_terms
        .iter()
        .map(|t| regex::escape(&t.iter().collect::<String>()))
        .collect::<Vec<_>>()
        .join("|");

    let re = match Regex::new(&format!("(?i)({pattern})")) {
        Ok(re) => re,
        Err(e) => {
            log::debug!("highlight pattern rejected: {e}");
            return window.iter().collect();
        }
    };

    // Byte offset of each character in the folded window, for mapping match
    // spans back to character ranges.
    let mut char_starts: Vec<usize> = Vec::with_capacity(folded_window.len() + 1);
    let mut offset = 0;
    for c in folded_window {
        char_starts.push(offset);
        offset += c.len_utf8();
    }
    char_starts.push(offset);

    let char_at = |byte: usize| -> usize {
        char_starts
            .binary_search(&byte)
            .unwrap_or_else(|insert| insert.saturating_sub(1))
    };

    let mut out = String::new();
    let mut done = 0;
    for m in re.find_iter(&folded_text) {
        let (from, to) = (char_at(m.start()), char_at(m.end()));
        out.extend(&window[done..from]);
        out.push_str(HIGHLIGHT_OPEN);
        out.extend(&window[from..to]);
        out.push_str(HIGHLIGHT_CLOSE);
        done = to;
    }
    out.extend(&window[done..]);
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchConfig;

    fn filter() -> StopwordFilter {
        StopwordFilter::new(&SearchConfig::default())
    }

    fn strip_markers(highlighted: &str) -> String {
        highlighted
            .replace(HIGHLIGHT_OPEN, "")
            .replace(HIGHLIGHT_CLOSE, "")
    }

    fn long_text() -> String {
        let mut text = String::new();
        for i in 0..40 {
            text.push_str(&format!("mot{i} rempli de contexte "));
        }
        text.push_str("ici le développement durable apparaît ");
        for i in 0..40 {
            text.push_str(&format!("suite{i} encore du contexte "));
        }
        text.trim_end().to_string()
    }

    // ------------------------------------------------------------------------
    // Window placement tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_centers_on_match() {
        let text = long_text();
        let snippet = extract(&text, "développement", 80, &filter());
        assert!(snippet.text.contains("développement"));
        assert!(snippet.text.starts_with("..."));
        assert!(snippet.text.ends_with("..."));
    }

    #[test]
    fn test_match_at_text_start() {
        let snippet = extract(
            "durable est le premier mot de cette page de test",
            "durable",
            30,
            &filter(),
        );
        assert!(!snippet.text.starts_with("..."));
        assert!(snippet.text.ends_with("..."));
    }

    #[test]
    fn test_short_text_no_ellipsis() {
        let snippet = extract("gouvernance et éthique", "gouvernance", 180, &filter());
        assert_eq!(snippet.text, "gouvernance et éthique");
        assert!(!snippet.text.contains("..."));
    }

    #[test]
    fn test_word_boundary_snap() {
        let text = long_text();
        let snippet = extract(&text, "développement", 80, &filter());
        // after the leading ellipsis the window starts on a whole word
        let body = snippet.text.trim_start_matches("...");
        assert!(!body.starts_with(' '));
        let first_word = body.split_whitespace().next().unwrap();
        assert!(text.contains(&format!(" {first_word}")) || text.starts_with(first_word));
    }

    // ------------------------------------------------------------------------
    // Fallback tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_no_usable_terms_returns_head() {
        // both words are short or stopwords
        let snippet = extract("un texte assez long pour être coupé quelque part", "le et", 20, &filter());
        assert!(snippet.text.ends_with("..."));
        assert_eq!(snippet.highlighted, snippet.text);
    }

    #[test]
    fn test_term_not_found_returns_head() {
        let snippet = extract("gouvernance et éthique", "introuvable", 180, &filter());
        assert_eq!(snippet.text, "gouvernance et éthique");
        assert_eq!(snippet.highlighted, snippet.text);
    }

    #[test]
    fn test_head_shorter_than_budget_has_no_ellipsis() {
        let snippet = extract("court", "le", 180, &filter());
        assert_eq!(snippet.text, "court");
    }

    // ------------------------------------------------------------------------
    // Highlighting tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_highlight_wraps_match() {
        let snippet = extract("Environnement et développement durable", "durable", 180, &filter());
        assert!(snippet.highlighted.contains("<mark>durable</mark>"));
    }

    #[test]
    fn test_highlight_accent_insensitive() {
        // unaccented query must highlight the accented original
        let snippet = extract(
            "Environnement et développement durable",
            "developpement",
            180,
            &filter(),
        );
        assert!(snippet.highlighted.contains("<mark>développement</mark>"));
    }

    #[test]
    fn test_highlight_case_insensitive() {
        let snippet = extract("DURABLE en majuscules", "durable", 180, &filter());
        assert!(snippet.highlighted.contains("<mark>DURABLE</mark>"));
    }

    #[test]
    fn test_highlight_multiple_terms() {
        let snippet = extract(
            "gouvernance éthique et gouvernance encore",
            "gouvernance éthique",
            180,
            &filter(),
        );
        let marks = snippet.highlighted.matches(HIGHLIGHT_OPEN).count();
        assert_eq!(marks, 3);
    }

    #[test]
    fn test_regex_special_chars_escaped() {
        let snippet = extract("prix (h.t.) affiché", "(h.t.)", 180, &filter());
        assert!(snippet.highlighted.contains("<mark>(h.t.)</mark>"));
    }

    // ------------------------------------------------------------------------
    // Invariant tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_stripped_highlight_equals_snippet() {
        let long = long_text();
        for (text, query) in [
            ("Environnement et développement durable", "developpement"),
            (long.as_str(), "développement durable"),
            ("gouvernance et éthique", "absent"),
        ] {
            let snippet = extract(text, query, 80, &filter());
            assert_eq!(strip_markers(&snippet.highlighted), snippet.text);
        }
    }

    #[test]
    fn test_ellipsis_invariant() {
        let text = long_text();
        let snippet = extract(&text, "développement", 60, &filter());
        // interior window: ellipses on both sides
        assert!(snippet.text.starts_with("..."));
        assert!(snippet.text.ends_with("..."));
    }
}
