//! # folia-cli
//!
//! Command-line front-end for the Folia page-search subsystem.
//!
//! This crate provides one-shot commands over a corpus JSON file:
//! - `search`: ranked or boolean search with snippets
//! - `parse`: show how a query classifies and parses
//! - `suggest`: fuzzy correction and "did you mean" alternatives
//! - `complete`: autocomplete the last word of a partial query
//! - `stats`: corpus and index statistics

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod commands;
pub mod error;

pub use error::{Error, Result};
