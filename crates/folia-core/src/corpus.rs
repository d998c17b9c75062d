//! OCR corpus wire types and the JSON loader.
//!
//! A corpus is the pre-extracted text of one scanned document: a metadata
//! header plus one entry per page, as produced by the OCR pipeline. Field
//! names follow the pipeline's camelCase JSON so a corpus file round-trips
//! unmodified.
//!
//! Pages that failed OCR carry an `error` marker and/or an empty `text`;
//! they stay in the file (the page numbering must not shift) but are not
//! indexable.
//!
//! # Example
//!
//! ```rust
//! use folia_core::Corpus;
//!
//! let json = r#"{
//!     "metadata": { "totalPages": 1, "successful": 1, "failed": 0 },
//!     "pages": [
//!         { "id": 1, "pageNumber": 1, "filename": "page-001.png",
//!           "text": "Gouvernance et éthique", "confidence": 93.4 }
//!     ]
//! }"#;
//!
//! let corpus: Corpus = serde_json::from_str(json).unwrap();
//! assert_eq!(corpus.pages.len(), 1);
//! assert!(corpus.pages[0].is_indexable());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Header describing how the corpus was produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusMetadata {
    /// Total number of pages in the source document.
    #[serde(default)]
    pub total_pages: u32,

    /// Pages the OCR pipeline extracted successfully.
    #[serde(default)]
    pub successful: u32,

    /// Pages the OCR pipeline failed on.
    #[serde(default)]
    pub failed: u32,

    /// Detected document language (e.g. "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Mean OCR confidence across successful pages, in percent.
    #[serde(default)]
    pub avg_confidence: f32,

    /// Total OCR processing time in seconds.
    #[serde(default)]
    pub processing_time: f64,

    /// Extraction timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// One page of extracted text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusPage {
    /// Stable page identifier, unique within the corpus.
    pub id: u64,

    /// 1-based page number in the source document.
    pub page_number: u32,

    /// Source image filename.
    #[serde(default)]
    pub filename: String,

    /// Extracted text, empty when OCR produced nothing.
    #[serde(default)]
    pub text: String,

    /// OCR confidence for this page, in percent.
    #[serde(default)]
    pub confidence: f32,

    /// Word count reported by the OCR pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<u32>,

    /// Error message when extraction failed for this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CorpusPage {
    /// Whether this page carries text worth indexing.
    ///
    /// A page is indexable when it has no error marker and its text is
    /// non-empty after trimming.
    pub fn is_indexable(&self) -> bool {
        self.error.as_deref().is_none_or(str::is_empty) && !self.text.trim().is_empty()
    }
}

/// A full OCR corpus: metadata plus pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// Extraction metadata.
    #[serde(default)]
    pub metadata: CorpusMetadata,

    /// All pages, failed ones included.
    #[serde(default)]
    pub pages: Vec<CorpusPage>,
}

impl Corpus {
    /// Load a corpus from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid corpus
    /// JSON. Nothing is cached on failure; callers may retry.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(e, path))?;
        let corpus = Self::from_json(&content)?;
        log::debug!(
            "read corpus from {}: {} pages ({} indexable)",
            path.display(),
            corpus.pages.len(),
            corpus.indexable_pages()
        );
        Ok(corpus)
    }

    /// Parse a corpus from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::parse(format!("Invalid corpus JSON: {e}")))
    }

    /// Count of pages that will be indexed.
    pub fn indexable_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_indexable()).count()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_json() -> &'static str {
        r#"{
            "metadata": {
                "totalPages": 3,
                "successful": 2,
                "failed": 1,
                "language": "fr",
                "avgConfidence": 91.5,
                "processingTime": 12.8,
                "timestamp": "2025-03-14T09:26:53Z"
            },
            "pages": [
                { "id": 1, "pageNumber": 1, "filename": "page-001.png",
                  "text": "Environnement et développement durable",
                  "confidence": 94.1, "words": 5 },
                { "id": 2, "pageNumber": 2, "filename": "page-002.png",
                  "text": "Gouvernance et éthique", "confidence": 88.9 },
                { "id": 3, "pageNumber": 3, "filename": "page-003.png",
                  "text": "", "confidence": 0.0, "error": "OCR timeout" }
            ]
        }"#
    }

    // ------------------------------------------------------------------------
    // Parsing tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_from_json() {
        let corpus = Corpus::from_json(sample_json()).unwrap();
        assert_eq!(corpus.metadata.total_pages, 3);
        assert_eq!(corpus.metadata.language.as_deref(), Some("fr"));
        assert_eq!(corpus.pages.len(), 3);
        assert_eq!(corpus.pages[0].page_number, 1);
        assert_eq!(corpus.pages[2].error.as_deref(), Some("OCR timeout"));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = Corpus::from_json("{ not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_camel_case_round_trip() {
        let corpus = Corpus::from_json(sample_json()).unwrap();
        let json = serde_json::to_string(&corpus).unwrap();
        assert!(json.contains("pageNumber"));
        assert!(json.contains("avgConfidence"));
        assert!(!json.contains("page_number"));

        let restored = Corpus::from_json(&json).unwrap();
        assert_eq!(restored.pages.len(), corpus.pages.len());
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{ "pages": [ { "id": 7, "pageNumber": 7 } ] }"#;
        let corpus = Corpus::from_json(json).unwrap();
        assert_eq!(corpus.pages[0].id, 7);
        assert!(corpus.pages[0].text.is_empty());
        assert!(corpus.pages[0].words.is_none());
    }

    // ------------------------------------------------------------------------
    // Indexability tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_is_indexable() {
        let corpus = Corpus::from_json(sample_json()).unwrap();
        assert!(corpus.pages[0].is_indexable());
        assert!(corpus.pages[1].is_indexable());
        assert!(!corpus.pages[2].is_indexable());
        assert_eq!(corpus.indexable_pages(), 2);
    }

    #[test]
    fn test_empty_error_marker_is_indexable() {
        let page = CorpusPage {
            id: 1,
            page_number: 1,
            text: "quelque chose".to_string(),
            error: Some(String::new()),
            ..Default::default()
        };
        assert!(page.is_indexable());
    }

    #[test]
    fn test_whitespace_only_text_not_indexable() {
        let page = CorpusPage {
            id: 1,
            page_number: 1,
            text: "   \n\t ".to_string(),
            ..Default::default()
        };
        assert!(!page.is_indexable());
    }

    // ------------------------------------------------------------------------
    // File loading tests
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(sample_json().as_bytes()).unwrap();

        let corpus = Corpus::from_path(&path).await.unwrap();
        assert_eq!(corpus.pages.len(), 3);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = Corpus::from_path("/nonexistent/corpus.json").await;
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("/nonexistent/corpus.json"));
    }
}
