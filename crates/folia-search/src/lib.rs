//! Full-text page search for Folia.
//!
//! This crate is the search subsystem of a scanned-document viewer: it
//! indexes the OCR text of a multi-page document in memory and answers
//! ranked, boolean, fuzzy-corrected, and autocomplete queries with
//! highlighted snippets pointing back at page numbers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      folia-search                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchEngine (orchestration, ranking, boolean algebra)     │
//! │  ├── PageIndex (Tantivy adapter: title + content fields)    │
//! │  ├── Vocabulary (fuzzy correction, autocomplete)            │
//! │  └── page table (original text, snippets)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ParsedQuery (boolean mini-language)                        │
//! │  Snippet extraction (windowing + <mark> highlighting)       │
//! │  normalize (accent/case folding)                            │
//! │  StopwordFilter (stop-words lists + custom words)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! Loading is the only mutation. Once [`SearchEngine::load_corpus`] returns,
//! every search method takes `&self` and is a single synchronous
//! computation, so back-to-back queries never interfere. Issuing a search
//! before the load completes is the caller's responsibility; the engine
//! answers it with an empty result and a warning, not a panic.
//!
//! # Example
//!
//! ```rust,ignore
//! use folia_search::{SearchConfig, SearchOptions, load_engine};
//!
//! let engine = load_engine("ocr/corpus.json", SearchConfig::default()).await?;
//! for hit in engine.search("développement durable", &SearchOptions::default())? {
//!     println!("p.{} [{}] {}", hit.page_number, hit.score, hit.snippet);
//! }
//! ```

pub mod autocomplete;
pub mod engine;
pub mod fuzzy;
pub mod idset;
pub mod index;
pub mod normalize;
pub mod query;
pub mod schema;
pub mod snippet;
pub mod stopwords;
pub mod types;
pub mod vocabulary;

// Re-exports
pub use engine::{PageRecord, SearchEngine};
pub use index::{FieldHits, IndexedPage, PageIndex};
pub use query::{Operator, ParsedQuery, QueryTerm};
pub use schema::PageSchema;
pub use snippet::Snippet;
pub use stopwords::StopwordFilter;
pub use types::{LoadStats, SearchConfig, SearchOptions, SearchResult};
pub use vocabulary::Vocabulary;

use std::path::Path;

/// Read a corpus file and build a loaded engine.
///
/// This is the composition-root entry point: the application calls it once
/// at startup and passes the returned handle by reference to whoever needs
/// search. Nothing is cached here: on a read or parse failure the error
/// propagates and a later call starts over from the file.
pub async fn load_engine(
    path: impl AsRef<Path>,
    config: SearchConfig,
) -> folia_core::Result<SearchEngine> {
    let corpus = folia_core::Corpus::from_path(path).await?;
    let mut engine = SearchEngine::new(config);
    let stats = engine.load_corpus(&corpus)?;
    log::info!(
        "search engine ready: {}/{} pages indexed",
        stats.indexed_pages,
        stats.total_pages
    );
    Ok(engine)
}

// ============================================================================
// Tests
// ============================================================================
