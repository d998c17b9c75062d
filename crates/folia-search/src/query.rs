//! The boolean query mini-language.
//!
//! A raw query is either *simple* (one free-text string, ranked search) or
//! *advanced* (a sequence of terms with phrase quoting, AND/OR operators,
//! and NOT/hyphen negation, boolean-filter search). Classification is
//! syntactic: any quote character (unterminated included), any standalone
//! AND/OR/NOT keyword, or any hyphen-prefixed token makes a query advanced.
//!
//! # Examples
//!
//! ```rust
//! use folia_search::query::ParsedQuery;
//!
//! let parsed = ParsedQuery::parse("développement durable");
//! assert!(matches!(parsed, ParsedQuery::Simple { .. }));
//!
//! let parsed = ParsedQuery::parse("\"énergie renouvelable\" AND -carbone");
//! assert_eq!(parsed.readable(), "\"énergie renouvelable\" AND NOT carbone");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Standalone operator keywords, case-insensitive, at word boundaries.
static OPERATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(AND|OR|NOT)\b").expect("operator pattern is valid"));

/// Binary boolean operator joining two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Both sides must match.
    And,
    /// Either side may match.
    Or,
}

impl Operator {
    /// Parse a token as an operator keyword, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }

    /// Canonical uppercase rendering.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// One term of an advanced query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTerm {
    /// Term text, unquoted and without the negation prefix.
    pub value: String,

    /// Operator joining this term to the previous one, when written
    /// explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,

    /// The term was quoted: match it as an exact phrase.
    pub is_phrase: bool,

    /// The term excludes pages instead of selecting them.
    pub is_negated: bool,
}

/// A classified query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParsedQuery {
    /// Free-text query: the raw trimmed input, ranked search.
    Simple {
        /// The trimmed query string.
        value: String,
    },
    /// Boolean query: at least one real term, filter search.
    Advanced {
        /// Terms in writing order.
        terms: Vec<QueryTerm>,
    },
}

impl ParsedQuery {
    /// Classify and parse a raw query string.
    ///
    /// Degenerate advanced input (no terms, or nothing but operator
    /// keywords) falls back to the simple interpretation of the trimmed
    /// input rather than failing.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if !is_advanced(trimmed) {
            return Self::Simple {
                value: trimmed.to_string(),
            };
        }

        let terms = build_terms(&tokenize(trimmed));

        let all_operator_soup = terms
            .iter()
            .all(|t| Operator::from_token(&t.value).is_some() || t.value.eq_ignore_ascii_case("NOT"));
        if terms.is_empty() || all_operator_soup {
            return Self::Simple {
                value: trimmed.to_string(),
            };
        }

        Self::Advanced { terms }
    }

    /// Whether this query uses the boolean path.
    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::Advanced { .. })
    }

    /// Render the query as a boolean expression for display.
    ///
    /// Explicit operators print verbatim; terms without one get an implicit
    /// AND, except immediately before a negated term. Formatting only; has
    /// no effect on matching.
    pub fn readable(&self) -> String {
        match self {
            Self::Simple { value } => value.clone(),
            Self::Advanced { terms } => {
                let mut pieces: Vec<String> = Vec::new();
                for (i, term) in terms.iter().enumerate() {
                    if let Some(op) = term.operator {
                        pieces.push(op.as_str().to_string());
                    } else if i > 0 && !term.is_negated {
                        pieces.push("AND".to_string());
                    }
                    if term.is_negated {
                        pieces.push("NOT".to_string());
                    }
                    if term.is_phrase {
                        pieces.push(format!("\"{}\"", term.value));
                    } else {
                        pieces.push(term.value.clone());
                    }
                }
                pieces.join(" ")
            }
        }
    }
}

/// Syntactic advanced-query test.
fn is_advanced(query: &str) -> bool {
    query.contains('"')
        || query.contains('\'')
        || OPERATOR_RE.is_match(query)
        || query
            .split_whitespace()
            .any(|t| t.starts_with('-') && t.chars().count() > 1)
}

/// A token produced by the quote-aware scanner.
#[derive(Debug, Clone, PartialEq)]
enum RawToken {
    /// Unquoted run, already split on embedded operator keywords.
    Word(String),
    /// Quoted span, quote characters removed.
    Phrase(String),
}

/// Scan a query into tokens, tracking single/double-quote state.
///
/// Inside quotes everything accumulates verbatim until the matching quote;
/// an unterminated quote yields a phrase running to the end of input.
/// Outside quotes, runs break on whitespace and are further split on
/// embedded operator keywords, so `sécurité AND formation` and
/// `sécurité)AND(formation` both yield three tokens.
fn tokenize(query: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut phrase = String::new();
    let mut quote: Option<char> = None;

    for c in query.chars() {
        match quote {
            Some(open) => {
                if c == open {
                    tokens.push(RawToken::Phrase(std::mem::take(&mut phrase)));
                    quote = None;
                } else {
                    phrase.push(c);
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    flush_word(&mut word, &mut tokens);
                    quote = Some(c);
                } else if c.is_whitespace() {
                    flush_word(&mut word, &mut tokens);
                } else {
                    word.push(c);
                }
            }
        }
    }

    if quote.is_some() {
        // unterminated quote: the open span still counts as a phrase
        tokens.push(RawToken::Phrase(phrase));
    } else {
        flush_word(&mut word, &mut tokens);
    }

    tokens
}

fn flush_word(word: &mut String, tokens: &mut Vec<RawToken>) {
    if word.is_empty() {
        return;
    }
    for part in split_operators(word) {
        tokens.push(RawToken::Word(part));
    }
    word.clear();
}

/// Split an unquoted run on embedded standalone operator keywords.
fn split_operators(chunk: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in OPERATOR_RE.find_iter(chunk) {
        if m.start() > last {
            parts.push(chunk[last..m.start()].to_string());
        }
        parts.push(chunk[m.start()..m.end()].to_string());
        last = m.end();
    }
    if last < chunk.len() {
        parts.push(chunk[last..].to_string());
    }
    parts
}

/// Assemble terms from tokens, carrying a pending operator that resets
/// after each emitted term.
fn build_terms(tokens: &[RawToken]) -> Vec<QueryTerm> {
    let mut terms = Vec::new();
    let mut pending: Option<Operator> = None;

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            RawToken::Phrase(text) => {
                terms.push(QueryTerm {
                    value: text.clone(),
                    operator: pending.take(),
                    is_phrase: true,
                    is_negated: false,
                });
            }
            RawToken::Word(word) => {
                if let Some(op) = Operator::from_token(word) {
                    pending = Some(op);
                } else if word.eq_ignore_ascii_case("NOT") {
                    // NOT negates the following token, quoted or not
                    if let Some(next) = tokens.get(i + 1) {
                        let (value, was_quoted) = match next {
                            RawToken::Phrase(text) => (text.clone(), true),
                            RawToken::Word(text) => (text.clone(), false),
                        };
                        terms.push(QueryTerm {
                            value,
                            operator: pending.take(),
                            is_phrase: was_quoted,
                            is_negated: true,
                        });
                        i += 1;
                    }
                } else if let Some(stripped) = word.strip_prefix('-')
                    && !stripped.is_empty()
                {
                    terms.push(QueryTerm {
                        value: stripped.to_string(),
                        operator: pending.take(),
                        is_phrase: false,
                        is_negated: true,
                    });
                } else if !word.is_empty() {
                    terms.push(QueryTerm {
                        value: word.clone(),
                        operator: pending.take(),
                        is_phrase: false,
                        is_negated: false,
                    });
                }
            }
        }
        i += 1;
    }

    terms
}

// ============================================================================
// Tests
// ============================================================================
