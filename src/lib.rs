//! Keylift - localization key extraction for translation platforms
//!
//! Keylift is a CLI tool and library that scans a source tree for
//! localization keys and aggregates them into a namespace-partitioned map
//! ready for upload to a translation platform. Extraction runs in parallel
//! with per-file fault isolation, so one broken source file cannot corrupt
//! the rest of a run.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and output)
//! - `config`: Configuration file loading and parsing
//! - `error`: Typed errors for the extraction pipeline
//! - `extraction`: Core pipeline (discovery, extractors, worker pool, aggregation)

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;

pub use error::ExtractError;
pub use extraction::pipeline::{ExtractOptions, extract_from_files, extract_keys};
