//! Typed errors for the extraction pipeline.
//!
//! The pipeline distinguishes pre-flight failures (discovery, extractor
//! resolution) from per-file failures surfaced during the parallel batch.
//! A per-file failure fails the whole run: completed results for other
//! files are discarded rather than returned partially.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised by the extraction pipeline.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A glob pattern was invalid or the filesystem could not be read
    /// while expanding patterns. Raised before any work is scheduled.
    #[error("discovery failed: {message}")]
    Discovery { message: String },

    /// The custom extractor module could not be found or does not satisfy
    /// the extractor contract. Raised before any work is scheduled.
    #[error("failed to load extractor '{}': {message}", path.display())]
    ExtractorLoad { path: PathBuf, message: String },

    /// One file's extraction raised an error, crashed, or returned
    /// malformed data. Fatal for the whole batch.
    #[error("extraction failed for '{}': {message}", file.display())]
    Extraction { file: PathBuf, message: String },

    /// Malformed intermediate data reached the aggregator. Not expected in
    /// normal operation.
    #[error("aggregation failed: {message}")]
    Aggregation { message: String },
}

impl ExtractError {
    pub(crate) fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    pub(crate) fn extractor_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ExtractorLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn extraction(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            file: file.into(),
            message: message.into(),
        }
    }

    /// The file whose extraction failed, if this is a per-file error.
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Self::Extraction { file, .. } => Some(file),
            _ => None,
        }
    }
}
