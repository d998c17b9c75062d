//! Folia Core — shared types, errors, and the corpus model.
//!
//! This crate provides the foundational types used across all Folia crates.
//! It has no internal Folia dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`corpus`]: OCR corpus wire types and the JSON loader
//! - [`util`]: Small text utilities

pub mod corpus;
pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use corpus::{Corpus, CorpusMetadata, CorpusPage};
pub use error::{Error, Result};
