//! Tantivy schema for the page index.
//!
//! Four fields:
//!
//! - `id`: stable page identifier (u64, INDEXED | STORED)
//! - `page_number`: 1-based page number (u64, STORED)
//! - `title`: "Page {n}" display title (TEXT | STORED), weight 3
//! - `content`: accent/case-normalized page text (TEXT), weight 1
//!
//! Full-text fields are indexed with positions so quoted phrases work.
//! Content is normalized before it reaches the index, so the registered
//! tokenizer only needs to split and lowercase.

use tantivy::Index;
use tantivy::schema::{
    Field, INDEXED, IndexRecordOption, STORED, Schema, SchemaBuilder, TextFieldIndexing,
    TextOptions,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};

/// Name of the tokenizer registered for full-text fields.
const TOKENIZER_NAME: &str = "folia_text";

/// Additive score weight for a title match.
pub const TITLE_WEIGHT: u32 = 3;

/// Additive score weight for a content match.
pub const CONTENT_WEIGHT: u32 = 1;

/// Page-index schema holding typed field references.
#[derive(Clone)]
pub struct PageSchema {
    schema: Schema,

    /// Stable page identifier.
    pub id: Field,
    /// 1-based page number.
    pub page_number: Field,
    /// Display title (weight 3 in ranked search).
    pub title: Field,
    /// Normalized page text (weight 1 in ranked search).
    pub content: Field,
}

impl PageSchema {
    /// Build the page schema.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();

        let text_indexing = TextFieldIndexing::default()
            .set_tokenizer(TOKENIZER_NAME)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions);

        let id = builder.add_u64_field("id", INDEXED | STORED);
        let page_number = builder.add_u64_field("page_number", STORED);
        let title = builder.add_text_field(
            "title",
            TextOptions::default()
                .set_indexing_options(text_indexing.clone())
                .set_stored(),
        );
        let content = builder.add_text_field(
            "content",
            TextOptions::default().set_indexing_options(text_indexing),
        );

        let schema = builder.build();

        Self {
            schema,
            id,
            page_number,
            title,
            content,
        }
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register the full-text tokenizer with an index.
    ///
    /// Must be called after creating an index, before indexing or querying.
    pub fn register_tokenizers(index: &Index) {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .build();
        index.tokenizers().register(TOKENIZER_NAME, analyzer);
    }

    /// Full-text fields with their additive score weights, title first.
    pub fn full_text_fields(&self) -> Vec<(Field, u32)> {
        vec![(self.title, TITLE_WEIGHT), (self.content, CONTENT_WEIGHT)]
    }
}

impl std::fmt::Debug for PageSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSchema").field("field_count", &4).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_field_names() {
        let schema = PageSchema::build();
        let tantivy_schema = schema.schema();

        assert!(tantivy_schema.get_field("id").is_ok());
        assert!(tantivy_schema.get_field("page_number").is_ok());
        assert!(tantivy_schema.get_field("title").is_ok());
        assert!(tantivy_schema.get_field("content").is_ok());
    }

    #[test]
    fn test_full_text_fields_weights() {
        let schema = PageSchema::build();
        let fields = schema.full_text_fields();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].1, TITLE_WEIGHT);
        assert_eq!(fields[1].1, CONTENT_WEIGHT);
        assert!(TITLE_WEIGHT > CONTENT_WEIGHT);
    }

    #[test]
    fn test_field_types() {
        let schema = PageSchema::build();
        let tantivy_schema = schema.schema();

        let id_entry = tantivy_schema.get_field_entry(schema.id);
        assert!(id_entry.is_indexed());
        assert!(id_entry.is_stored());

        let page_entry = tantivy_schema.get_field_entry(schema.page_number);
        assert!(!page_entry.is_indexed());
        assert!(page_entry.is_stored());

        // content is searchable but not stored; the engine owns page text
        let content_entry = tantivy_schema.get_field_entry(schema.content);
        assert!(content_entry.is_indexed());
        assert!(!content_entry.is_stored());
    }

    #[test]
    fn test_tokenizer_registration() {
        let schema = PageSchema::build();
        let index = Index::create_in_ram(schema.schema().clone());

        PageSchema::register_tokenizers(&index);

        assert!(index.tokenizers().get(TOKENIZER_NAME).is_some());
    }
}
