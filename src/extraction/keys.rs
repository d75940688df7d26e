//! Plain-data types produced by extractors.
//!
//! These types cross the worker isolation boundary, so they carry no
//! references into extractor state. They also double as the wire shape for
//! custom extractor plugins, hence the camelCase serde names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One key occurrence found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedKey {
    /// The key name. Required, non-empty.
    pub key_name: String,
    /// Explicit namespace, if the source declared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Human-readable initial content for the translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// 1-based source line, when the extractor can report one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ExtractedKey {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            namespace: None,
            default_value: None,
            line: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// All keys extracted from a single file, in source order.
///
/// Transient: lives only for the duration of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub file: PathBuf,
    pub keys: Vec<ExtractedKey>,
}

impl ExtractionResult {
    pub fn new(file: impl Into<PathBuf>, keys: Vec<ExtractedKey>) -> Self {
        Self {
            file: file.into(),
            keys,
        }
    }
}
