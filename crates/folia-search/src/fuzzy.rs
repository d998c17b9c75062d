//! Fuzzy correction of misspelled query terms.
//!
//! When a ranked search finds nothing, the engine asks this module for a
//! corrected query: each unknown term is replaced by the closest vocabulary
//! word within a distance budget of ⌊len/4⌋ edits. Candidates whose length
//! differs by more than the budget or whose first character differs are
//! pruned before the DP runs.
//!
//! # Example
//!
//! ```rust
//! use folia_search::fuzzy::levenshtein;
//!
//! assert_eq!(levenshtein("gouvernance", "gouvernance"), 0);
//! assert_eq!(levenshtein("gouvernance", "gouvernence"), 1);
//! ```

use folia_core::util::text::char_len;

use crate::normalize::normalize;
use crate::stopwords::StopwordFilter;
use crate::vocabulary::Vocabulary;

/// Levenshtein distance between two strings, counted in characters.
///
/// Classic single-row DP with a length-difference fast path: the difference
/// in character counts is a lower bound on the distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, &ac) in a_chars.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            let next = (row[j + 1] + 1).min(row[j] + 1).min(prev + cost);
            prev = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b_chars.len()]
}

/// Edit budget for a term of the given character length.
pub fn max_distance(len: usize) -> usize {
    len / 4
}

/// Closest vocabulary word to a normalized term, within the term's edit
/// budget.
///
/// Returns the word and its distance. Ties keep the alphabetically first
/// candidate.
fn best_candidate(norm_term: &str, vocab: &Vocabulary) -> Option<(String, usize)> {
    let term_len = char_len(norm_term);
    let budget = max_distance(term_len);
    let first = norm_term.chars().next()?;

    let mut best: Option<(String, usize)> = None;
    for word in vocab.iter() {
        if char_len(word).abs_diff(term_len) > budget {
            continue;
        }
        if word.chars().next() != Some(first) {
            continue;
        }
        let distance = levenshtein(norm_term, word);
        if distance <= budget && best.as_ref().is_none_or(|(_, d)| distance < *d) {
            best = Some((word.to_string(), distance));
        }
    }
    best
}

/// Correct the misspelled terms of a query against the vocabulary.
///
/// Terms shorter than three characters or on the stopword list pass through
/// untouched; terms whose normalized form is already known keep their
/// original spelling (accents included). The corrected string is returned
/// only when it differs from the lowercased input, otherwise the query comes
/// back unchanged.
pub fn suggest(query: &str, vocab: &Vocabulary, stopwords: &StopwordFilter) -> String {
    let corrected: Vec<String> = query
        .split_whitespace()
        .map(|term| {
            if !stopwords.is_indexable_token(term) {
                return term.to_string();
            }
            let norm = normalize(term);
            if vocab.contains(&norm) {
                return term.to_string();
            }
            match best_candidate(&norm, vocab) {
                Some((word, _)) => word,
                None => term.to_string(),
            }
        })
        .collect();

    let corrected = corrected.join(" ");
    if corrected != query.to_lowercase() {
        corrected
    } else {
        query.to_string()
    }
}

/// Up to `limit` vocabulary words close to the whole query, ascending by
/// distance.
///
/// Presented to the user as "did you mean" options; never applied
/// automatically.
pub fn alternatives(query: &str, vocab: &Vocabulary, limit: usize) -> Vec<String> {
    let norm = normalize(query.trim());
    let term_len = char_len(&norm);
    let budget = max_distance(term_len);
    let Some(first) = norm.chars().next() else {
        return Vec::new();
    };

    let mut candidates: Vec<(usize, String)> = vocab
        .iter()
        .filter(|word| char_len(word).abs_diff(term_len) <= budget)
        .filter(|word| word.chars().next() == Some(first))
        .filter_map(|word| {
            let distance = levenshtein(&norm, word);
            (distance <= budget).then(|| (distance, word.to_string()))
        })
        .collect();

    candidates.sort_by_key(|(distance, _)| *distance);
    candidates
        .into_iter()
        .take(limit)
        .map(|(_, word)| word)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchConfig;

    fn vocab_of(words: &[&str]) -> Vocabulary {
        let mut vocab = Vocabulary::new();
        for word in words {
            vocab.insert(*word);
        }
        vocab
    }

    fn filter() -> StopwordFilter {
        StopwordFilter::new(&SearchConfig::default())
    }

    // ------------------------------------------------------------------------
    // Levenshtein tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", "abd"), 1);
        assert_eq!(levenshtein("abc", "abcd"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_counts_chars() {
        // one substitution, even though the byte lengths differ
        assert_eq!(levenshtein("cafe", "café"), 1);
    }

    #[test]
    fn test_max_distance() {
        assert_eq!(max_distance(3), 0);
        assert_eq!(max_distance(4), 1);
        assert_eq!(max_distance(8), 2);
        assert_eq!(max_distance(13), 3);
    }

    // ------------------------------------------------------------------------
    // Suggestion tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_suggest_corrects_typo() {
        let vocab = vocab_of(&["gouvernance", "ethique"]);
        let suggestion = suggest("gouvernence", &vocab, &filter());
        assert_eq!(suggestion, "gouvernance");
    }

    #[test]
    fn test_suggest_keeps_known_term_unchanged() {
        let vocab = vocab_of(&["securite"]);
        // "Sécurité" normalizes to a known word, so the accented original
        // survives
        let suggestion = suggest("Sécurité", &vocab, &filter());
        assert_eq!(suggestion, "Sécurité");
    }

    #[test]
    fn test_suggest_respects_budget() {
        let vocab = vocab_of(&["gouvernance"]);
        // too many edits away for its length
        let suggestion = suggest("gxxvxrnxnce", &vocab, &filter());
        assert_eq!(suggestion, "gxxvxrnxnce");
    }

    #[test]
    fn test_suggest_requires_same_first_char() {
        let vocab = vocab_of(&["durable"]);
        let suggestion = suggest("burable", &vocab, &filter());
        assert_eq!(suggestion, "burable");
    }

    #[test]
    fn test_suggest_skips_short_and_stopword_terms() {
        let vocab = vocab_of(&["developpement"]);
        let suggestion = suggest("le developpment", &vocab, &filter());
        assert_eq!(suggestion, "le developpement");
    }

    #[test]
    fn test_suggest_multi_term() {
        let vocab = vocab_of(&["energie", "renouvelable"]);
        let suggestion = suggest("energie renouvelble", &vocab, &filter());
        assert_eq!(suggestion, "energie renouvelable");
    }

    // ------------------------------------------------------------------------
    // Alternatives tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_alternatives_sorted_by_distance() {
        let vocab = vocab_of(&["formation", "formations", "fondation"]);
        let alts = alternatives("formation", &vocab, 3);
        assert_eq!(alts[0], "formation");
        assert!(alts.contains(&"formations".to_string()));
    }

    #[test]
    fn test_alternatives_limit() {
        let vocab = vocab_of(&["formation", "formations", "formatage"]);
        let alts = alternatives("formation", &vocab, 1);
        assert_eq!(alts.len(), 1);
    }

    #[test]
    fn test_alternatives_empty_query() {
        let vocab = vocab_of(&["formation"]);
        assert!(alternatives("", &vocab, 3).is_empty());
    }
}
