//! Accent and case normalization.
//!
//! Matching and vocabulary lookups are accent-insensitive: page text is
//! normalized before indexing and queries are normalized the same way before
//! lookup, so "é" and "e" always compare equal. Normalization is pure and
//! total.
//!
//! # Algorithm
//!
//! 1. NFD normalize (decompose characters into base + combining marks)
//! 2. Drop combining marks
//! 3. Lowercase
//!
//! # Example
//!
//! ```rust
//! use folia_search::normalize::normalize;
//!
//! assert_eq!(normalize("Développement"), "developpement");
//! assert_eq!(normalize("ÉTHIQUE"), "ethique");
//! ```

use unicode_normalization::UnicodeNormalization;

/// Normalize text to its diacritic-free, lowercase canonical form.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Fold a single character to its lowercase base form.
///
/// Unlike [`normalize`], this is a one-to-one mapping: the output always has
/// the same character count as the input, which lets the snippet scanner map
/// positions in folded text back to the original.
pub fn fold_char(c: char) -> char {
    let mut base = c;
    let mut seen = false;
    unicode_normalization::char::decompose_canonical(c, |d| {
        if !seen {
            base = d;
            seen = true;
        }
    });
    base.to_lowercase().next().unwrap_or(base)
}

/// Fold every character of a string, preserving character count.
pub fn fold_chars(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

/// Check if a character is a combining mark (diacritic).
///
/// Covers the Unicode combining-mark blocks that occur in decomposed Latin
/// text.
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}' // Combining Half Marks
    )
}

// ============================================================================
// Tests
// ============================================================================
