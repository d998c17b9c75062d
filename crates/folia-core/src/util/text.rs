//! Character-based string helpers.
//!
//! OCR text is French-heavy, so every length or position here counts
//! characters, never bytes. Used by tokenization, suggestion, and snippet
//! code in the search crate.

/// Number of characters (not bytes) in a string.
///
/// # Examples
///
/// ```
/// use folia_core::util::text::char_len;
///
/// assert_eq!(char_len("page"), 4);
/// assert_eq!(char_len("éthique"), 7);
/// ```
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Last whitespace-delimited word of a string, if any.
///
/// # Examples
///
/// ```
/// use folia_core::util::text::last_word;
///
/// assert_eq!(last_word("gestion des déch"), Some("déch"));
/// assert_eq!(last_word("  "), None);
/// ```
pub fn last_word(s: &str) -> Option<&str> {
    s.split_whitespace().next_back()
}

/// All whitespace-delimited words except the last, joined by single spaces.
///
/// # Examples
///
/// ```
/// use folia_core::util::text::leading_words;
///
/// assert_eq!(leading_words("gestion des déch"), "gestion des");
/// assert_eq!(leading_words("déch"), "");
/// ```
pub fn leading_words(s: &str) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    match words.split_last() {
        Some((_, rest)) => rest.join(" "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_ascii() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_char_len_accented() {
        // "développement" is 13 characters but more bytes in UTF-8
        assert_eq!(char_len("développement"), 13);
        assert!("développement".len() > 13);
    }

    #[test]
    fn test_last_word_single() {
        assert_eq!(last_word("sécurité"), Some("sécurité"));
    }

    #[test]
    fn test_last_word_trailing_space() {
        assert_eq!(last_word("formation "), Some("formation"));
    }

    #[test]
    fn test_leading_words_multi() {
        assert_eq!(leading_words("a b c"), "a b");
    }

    #[test]
    fn test_leading_words_collapses_whitespace() {
        assert_eq!(leading_words("a   b\tc"), "a b");
    }
}
