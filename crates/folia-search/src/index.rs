//! The inverted-index adapter.
//!
//! `PageIndex` wraps an in-memory Tantivy index behind the two lookups the
//! engine needs: a per-field ranked lookup for free-text queries and a flat
//! id lookup for boolean terms. Tantivy owns tokenization, postings, and
//! BM25 ordering; the engine owns page text, scoring weights, and set
//! algebra.
//!
//! # Usage
//!
//! ```rust
//! use folia_search::index::{IndexedPage, PageIndex};
//! use folia_search::schema::PageSchema;
//!
//! let mut index = PageIndex::create(PageSchema::build()).unwrap();
//! index
//!     .add_page(&IndexedPage {
//!         id: 1,
//!         page_number: 1,
//!         title: "Page 1".to_string(),
//!         content: "environnement et developpement durable".to_string(),
//!     })
//!     .unwrap();
//! index.commit().unwrap();
//!
//! let hits = index.field_lookup("durable", 10).unwrap();
//! assert_eq!(hits.content, vec![1]);
//! ```

use folia_core::{Error, Result};
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::Value;
use tantivy::{Index, IndexReader, IndexWriter, TantivyDocument};

use crate::idset;
use crate::schema::PageSchema;

/// Index writer buffer size (50MB).
const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// A document submitted to the index: identity plus the two full-text
/// fields.
#[derive(Debug, Clone)]
pub struct IndexedPage {
    /// Stable page identifier.
    pub id: u64,
    /// 1-based page number.
    pub page_number: u32,
    /// Display title ("Page {n}").
    pub title: String,
    /// Normalized page text.
    pub content: String,
}

/// Ids returned by a ranked lookup, grouped by the field they matched in.
///
/// Each list is ordered by the underlying engine's relevance, best first.
#[derive(Debug, Clone, Default)]
pub struct FieldHits {
    /// Pages matched in the title field.
    pub title: Vec<u64>,
    /// Pages matched in the content field.
    pub content: Vec<u64>,
}

impl FieldHits {
    /// True when no field produced any hit.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// In-memory Tantivy index over corpus pages.
pub struct PageIndex {
    index: Index,
    writer: IndexWriter,
    reader: IndexReader,
    schema: PageSchema,
}

impl PageIndex {
    /// Create an empty in-memory index.
    pub fn create(schema: PageSchema) -> Result<Self> {
        let index = Index::create_in_ram(schema.schema().clone());
        PageSchema::register_tokenizers(&index);

        let writer = index
            .writer(WRITER_BUFFER_SIZE)
            .map_err(|e| Error::operation(format!("Failed to create index writer: {e}")))?;
        let reader = index
            .reader()
            .map_err(|e| Error::operation(format!("Failed to create index reader: {e}")))?;

        Ok(Self {
            index,
            writer,
            reader,
            schema,
        })
    }

    /// Stage a page for indexing. Not searchable until [`commit`].
    ///
    /// [`commit`]: PageIndex::commit
    pub fn add_page(&mut self, page: &IndexedPage) -> Result<()> {
        let mut doc = TantivyDocument::new();
        doc.add_u64(self.schema.id, page.id);
        doc.add_u64(self.schema.page_number, u64::from(page.page_number));
        doc.add_text(self.schema.title, &page.title);
        doc.add_text(self.schema.content, &page.content);

        self.writer
            .add_document(doc)
            .map_err(|e| Error::operation(format!("Failed to add page: {e}")))?;
        Ok(())
    }

    /// Commit staged pages and make them visible to lookups.
    pub fn commit(&mut self) -> Result<()> {
        self.writer
            .commit()
            .map_err(|e| Error::operation(format!("Failed to commit index: {e}")))?;
        self.reader
            .reload()
            .map_err(|e| Error::operation(format!("Failed to reload index reader: {e}")))?;
        Ok(())
    }

    /// Number of committed pages.
    pub fn num_pages(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Ranked lookup of a free-text query, one pass per full-text field.
    ///
    /// Returns up to `per_field_limit` ids per field, grouped by field and
    /// ordered by the index's own relevance. The query string is parsed
    /// leniently; malformed operator syntax degrades instead of failing.
    pub fn field_lookup(&self, query: &str, per_field_limit: usize) -> Result<FieldHits> {
        let searcher = self.reader.searcher();
        let mut hits = FieldHits::default();

        for (field, _) in self.schema.full_text_fields() {
            let parser = QueryParser::for_index(&self.index, vec![field]);
            let (parsed, _errors) = parser.parse_query_lenient(query);

            let top = searcher
                .search(&parsed, &TopDocs::with_limit(per_field_limit.max(1)).order_by_score())
                .map_err(|e| Error::operation(format!("Index lookup failed: {e}")))?;

            let ids = self.resolve_ids(&top)?;
            if field == self.schema.title {
                hits.title = ids;
            } else {
                hits.content = ids;
            }
        }

        if per_field_limit == 0 {
            hits.title.clear();
            hits.content.clear();
        }
        Ok(hits)
    }

    /// All page ids matching a single boolean term, across both full-text
    /// fields, as a sorted id set.
    ///
    /// Phrase terms are submitted quoted so the underlying engine applies
    /// exact-phrase semantics; the engine re-verifies containment on top.
    pub fn matching_ids(&self, value: &str, phrase: bool) -> Result<Vec<u64>> {
        let searcher = self.reader.searcher();
        let fields: Vec<_> = self
            .schema
            .full_text_fields()
            .into_iter()
            .map(|(field, _)| field)
            .collect();

        let query = if phrase {
            format!("\"{value}\"")
        } else {
            value.to_string()
        };

        let parser = QueryParser::for_index(&self.index, fields);
        let (parsed, _errors) = parser.parse_query_lenient(&query);

        let limit = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX).max(1);
        let top = searcher
            .search(&parsed, &TopDocs::with_limit(limit).order_by_score())
            .map_err(|e| Error::operation(format!("Index lookup failed: {e}")))?;

        let mut ids = self.resolve_ids(&top)?;
        idset::canonicalize(&mut ids);
        Ok(ids)
    }

    fn resolve_ids(&self, top: &[(tantivy::Score, tantivy::DocAddress)]) -> Result<Vec<u64>> {
        let searcher = self.reader.searcher();
        let mut ids = Vec::with_capacity(top.len());
        for (_score, address) in top {
            let doc: TantivyDocument = searcher
                .doc(*address)
                .map_err(|e| Error::operation(format!("Failed to load indexed page: {e}")))?;
            if let Some(id) = doc.get_first(self.schema.id).and_then(|v| v.as_u64()) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

impl std::fmt::Debug for PageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIndex")
            .field("num_pages", &self.num_pages())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
