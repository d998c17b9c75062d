//! The search engine.
//!
//! Owns the page table and vocabulary, delegates inverted-index work to
//! [`PageIndex`], and orchestrates the two search paths:
//!
//! - **Ranked search** ([`SearchEngine::search`]): normalized multi-field
//!   lookup with additive field weights (title 3, content 1) and a single
//!   fuzzy-corrected retry when nothing matches.
//! - **Boolean search** ([`SearchEngine::search_advanced`]): per-term id
//!   sets combined left to right with AND/OR/NOT over the page-id universe;
//!   filter-only, flat score.
//!
//! The engine is constructed without an index; the first corpus load builds
//! one. Loading is the only mutation; every search path takes `&self`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use folia_search::{SearchConfig, SearchEngine, SearchOptions};
//!
//! let mut engine = SearchEngine::new(SearchConfig::default());
//! let stats = engine.load_corpus(&corpus)?;
//! log::info!("indexed {} pages", stats.indexed_pages);
//!
//! let results = engine.search("développement durable", &SearchOptions::default())?;
//! ```

use std::collections::HashMap;
use std::time::Instant;

use folia_core::{Corpus, Result};

use crate::autocomplete;
use crate::fuzzy;
use crate::idset;
use crate::index::{FieldHits, IndexedPage, PageIndex};
use crate::normalize::normalize;
use crate::query::{Operator, ParsedQuery, QueryTerm};
use crate::schema::{CONTENT_WEIGHT, PageSchema, TITLE_WEIGHT};
use crate::snippet;
use crate::stopwords::StopwordFilter;
use crate::types::{LoadStats, SearchConfig, SearchOptions, SearchResult};
use crate::vocabulary::Vocabulary;

/// Flat score assigned to boolean-search results.
const ADVANCED_SCORE: u32 = 5;

/// Default number of "did you mean" alternatives.
const ALTERNATIVES_LIMIT: usize = 3;

/// One indexed page, kept verbatim for snippets and result assembly.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Stable page identifier.
    pub id: u64,
    /// 1-based page number.
    pub page_number: u32,
    /// Original page text, accents and case intact.
    pub text: String,
    /// OCR confidence in percent.
    pub confidence: f32,
}

/// In-memory search engine over one OCR corpus.
pub struct SearchEngine {
    config: SearchConfig,
    stopwords: StopwordFilter,
    index: Option<PageIndex>,
    pages: HashMap<u64, PageRecord>,
    vocabulary: Vocabulary,
}

impl SearchEngine {
    /// Create an engine with no loaded corpus.
    ///
    /// Construction does no indexing work; the index is built by the first
    /// [`load_corpus`] call.
    ///
    /// [`load_corpus`]: SearchEngine::load_corpus
    pub fn new(config: SearchConfig) -> Self {
        let stopwords = StopwordFilter::new(&config);
        Self {
            config,
            stopwords,
            index: None,
            pages: HashMap::new(),
            vocabulary: Vocabulary::new(),
        }
    }

    /// Index a corpus.
    ///
    /// Pages with an error marker or empty text are counted and skipped,
    /// never raised. With `reset_on_load` (the default) any previously
    /// loaded corpus is dropped first; otherwise pages accumulate.
    pub fn load_corpus(&mut self, corpus: &Corpus) -> Result<LoadStats> {
        let started = Instant::now();

        let mut index = match self.index.take() {
            Some(existing) if !self.config.reset_on_load => existing,
            _ => {
                self.pages.clear();
                self.vocabulary.clear();
                PageIndex::create(PageSchema::build())?
            }
        };

        let mut total_pages = 0;
        let mut indexed_pages = 0;
        for page in &corpus.pages {
            total_pages += 1;
            if !page.is_indexable() {
                log::debug!("skipping page {} (no indexable text)", page.page_number);
                continue;
            }

            index.add_page(&IndexedPage {
                id: page.id,
                page_number: page.page_number,
                title: format!("Page {}", page.page_number),
                content: normalize(&page.text),
            })?;

            self.pages.insert(
                page.id,
                PageRecord {
                    id: page.id,
                    page_number: page.page_number,
                    text: page.text.clone(),
                    confidence: page.confidence,
                },
            );

            for raw in page.text.split_whitespace() {
                let token = raw.trim_matches(|c: char| !c.is_alphanumeric());
                if self.stopwords.is_indexable_token(token) {
                    self.vocabulary.insert(normalize(token));
                }
            }

            indexed_pages += 1;
        }

        index.commit()?;
        self.index = Some(index);

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let stats = LoadStats {
            total_pages,
            indexed_pages,
            vocabulary_size: self.vocabulary.len(),
            elapsed_ms,
        };
        log::info!(
            "indexed {}/{} pages, {} vocabulary words in {}ms",
            stats.indexed_pages,
            stats.total_pages,
            stats.vocabulary_size,
            stats.elapsed_ms
        );
        Ok(stats)
    }

    /// Parse a raw query and run it on the matching path.
    pub fn query(&self, raw: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        match ParsedQuery::parse(raw) {
            ParsedQuery::Simple { value } => self.search(&value, options),
            parsed @ ParsedQuery::Advanced { .. } => self.search_advanced(&parsed, options),
        }
    }

    /// Ranked free-text search.
    ///
    /// Queries shorter than two characters return nothing without touching
    /// the index, as does an engine with no corpus loaded (with a warning).
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        let trimmed = query.trim();
        if trimmed.chars().count() < 2 {
            return Ok(Vec::new());
        }
        let Some(index) = &self.index else {
            log::warn!("search before any corpus load, returning no results");
            return Ok(Vec::new());
        };

        // Over-fetch per field so re-weighting can promote content-and-title
        // pages past title-only ones.
        let per_field = options.limit.saturating_mul(2);
        let mut hits = index.field_lookup(&normalize(trimmed), per_field)?;

        // One corrected retry; misses after that stay empty.
        if hits.is_empty() && self.config.fuzzy_enabled {
            let corrected = fuzzy::suggest(trimmed, &self.vocabulary, &self.stopwords);
            if corrected != trimmed {
                log::debug!("no hits for {trimmed:?}, retrying as {corrected:?}");
                hits = index.field_lookup(&normalize(&corrected), per_field)?;
            }
        }

        let ranked = rank_hits(&hits, options.limit);
        Ok(ranked
            .into_iter()
            .filter_map(|(id, score)| self.build_result(id, score, trimmed, options))
            .collect())
    }

    /// Boolean filter search over a parsed query.
    ///
    /// Simple queries delegate to [`search`]; advanced queries combine
    /// per-term id sets left to right and score every survivor flat. No
    /// fuzzy retry on this path.
    ///
    /// [`search`]: SearchEngine::search
    pub fn search_advanced(
        &self,
        parsed: &ParsedQuery,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        let terms = match parsed {
            ParsedQuery::Simple { value } => return self.search(value, options),
            ParsedQuery::Advanced { terms } => terms,
        };
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        let Some(index) = &self.index else {
            log::warn!("search before any corpus load, returning no results");
            return Ok(Vec::new());
        };

        let mut universe: Vec<u64> = self.pages.keys().copied().collect();
        idset::canonicalize(&mut universe);

        // Left-to-right combination; an unmarked term continues the previous
        // effective operator. A leading operator has nothing on its left and
        // is ignored.
        let mut survivors: Option<Vec<u64>> = None;
        let mut last_op = Operator::And;
        for term in terms {
            let candidates = self.term_candidates(index, term, &universe)?;
            let operand = if term.is_negated {
                idset::complement(&universe, &candidates)
            } else {
                candidates
            };

            survivors = Some(match survivors {
                None => operand,
                Some(current) => {
                    let op = term.operator.unwrap_or(last_op);
                    last_op = op;
                    match op {
                        Operator::And => idset::intersect(&current, &operand),
                        Operator::Or => idset::union(&current, &operand),
                    }
                }
            });
        }

        // Snippets center on what the query selects, not what it excludes.
        let pseudo_query = terms
            .iter()
            .filter(|t| !t.is_negated)
            .map(|t| t.value.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let mut ids = survivors.unwrap_or_default();
        ids.truncate(options.limit);
        Ok(ids
            .into_iter()
            .filter_map(|id| self.build_result(id, ADVANCED_SCORE, &pseudo_query, options))
            .collect())
    }

    /// Verified positive candidate set for one boolean term.
    ///
    /// Phrase containment and negation are both decided against the stored
    /// normalized page text; the index's own phrase matching is treated as
    /// a pre-filter, not as the answer.
    fn term_candidates(
        &self,
        index: &PageIndex,
        term: &QueryTerm,
        universe: &[u64],
    ) -> Result<Vec<u64>> {
        let norm_value = normalize(&term.value);

        if term.is_negated {
            return Ok(universe
                .iter()
                .copied()
                .filter(|id| self.page_contains(*id, &norm_value))
                .collect());
        }

        let candidates = index.matching_ids(&norm_value, term.is_phrase)?;
        if term.is_phrase {
            return Ok(candidates
                .into_iter()
                .filter(|id| self.page_contains(*id, &norm_value))
                .collect());
        }
        Ok(candidates)
    }

    /// Substring check of a normalized value against a page's normalized
    /// text.
    fn page_contains(&self, id: u64, norm_value: &str) -> bool {
        self.pages
            .get(&id)
            .is_some_and(|page| normalize(&page.text).contains(norm_value))
    }

    fn build_result(
        &self,
        id: u64,
        score: u32,
        snippet_query: &str,
        options: &SearchOptions,
    ) -> Option<SearchResult> {
        let page = self.pages.get(&id)?;
        let (snippet, highlighted_snippet) = if options.include_snippets {
            let extracted = snippet::extract(
                &page.text,
                snippet_query,
                options.snippet_length,
                &self.stopwords,
            );
            (extracted.text, extracted.highlighted)
        } else {
            (String::new(), String::new())
        };

        Some(SearchResult {
            id: page.id,
            page_number: page.page_number,
            title: format!("Page {}", page.page_number),
            snippet,
            highlighted_snippet,
            score,
            confidence: page.confidence,
        })
    }

    /// One corrected form of the query, or the query unchanged.
    pub fn suggestion(&self, query: &str) -> String {
        fuzzy::suggest(query, &self.vocabulary, &self.stopwords)
    }

    /// Up to three "did you mean" alternatives, closest first.
    pub fn alternative_suggestions(&self, query: &str) -> Vec<String> {
        fuzzy::alternatives(query, &self.vocabulary, ALTERNATIVES_LIMIT)
    }

    /// Completions for the last word of a partial query.
    pub fn autocomplete(&self, partial: &str, limit: usize) -> Vec<String> {
        autocomplete::complete(partial, &self.vocabulary, &self.stopwords, limit)
    }

    /// Whether a corpus has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    /// Number of indexed pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of distinct vocabulary words.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("loaded", &self.is_loaded())
            .field("pages", &self.pages.len())
            .field("vocabulary", &self.vocabulary.len())
            .finish()
    }
}

/// Fuse field-grouped hits into `(id, score)` pairs, best first.
///
/// Every id in a field's hit list earns that field's weight; ids hit in
/// both fields accumulate the sum. The sort is stable, so equal scores keep
/// first-seen (title-first) order.
fn rank_hits(hits: &FieldHits, limit: usize) -> Vec<(u64, u32)> {
    let mut order: Vec<u64> = Vec::new();
    let mut scores: HashMap<u64, u32> = HashMap::new();

    for (ids, weight) in [(&hits.title, TITLE_WEIGHT), (&hits.content, CONTENT_WEIGHT)] {
        for &id in ids {
            let entry = scores.entry(id).or_insert_with(|| {
                order.push(id);
                0
            });
            *entry += weight;
        }
    }

    order.sort_by(|a, b| scores[b].cmp(&scores[a]));
    order.truncate(limit);
    order.into_iter().map(|id| (id, scores[&id])).collect()
}

// ============================================================================
// Tests
// ============================================================================
