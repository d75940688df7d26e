//! Folding per-file results into the final key map.
//!
//! Aggregation is a pure function of the completed batch: no I/O, no
//! shared state. The batch arrives in completion order, and the fold keeps
//! that order, so a key colliding across files with different default
//! values keeps whichever file settled last. That non-determinism is an
//! accepted property of the pipeline, not something to sort away.

use std::collections::HashMap;

use crate::error::ExtractError;
use crate::extraction::keys::ExtractionResult;

/// Namespace bucket identifier.
///
/// The null namespace is a distinct tag, never confusable with a user
/// namespace literally named `"null"` or `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Keys with neither an explicit nor a run-wide default namespace.
    None,
    Named(String),
}

impl Namespace {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The namespace name, or `None` for the null namespace.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Named(name) => Some(name),
        }
    }
}

/// The final, namespace-partitioned key map.
///
/// Within a bucket a key name identifies exactly one entry; the value is
/// the extracted default value, or `None` when the source gave none. This
/// is the one artifact that outlives a pipeline run: it is handed to the
/// upload collaborator, which owns serialization into the wire format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredKeys {
    buckets: HashMap<Namespace, HashMap<String, Option<String>>>,
}

impl FilteredKeys {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of keys across all buckets.
    pub fn key_count(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }

    pub fn namespace_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, namespace: &Namespace) -> Option<&HashMap<String, Option<String>>> {
        self.buckets.get(namespace)
    }

    /// Default value recorded for a key, if the key exists. The outer
    /// `Option` distinguishes a missing key from a key without a default.
    pub fn value(&self, namespace: &Namespace, key_name: &str) -> Option<Option<&str>> {
        self.buckets
            .get(namespace)
            .and_then(|b| b.get(key_name))
            .map(|v| v.as_deref())
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&Namespace, &HashMap<String, Option<String>>)> {
        self.buckets.iter()
    }
}

/// Fold a batch of per-file results into `FilteredKeys`.
///
/// Effective namespace per key: the key's explicit namespace, else the
/// run-wide default namespace, else the null-namespace sentinel. The
/// default namespace is threaded through here as a parameter rather than
/// rewritten onto already-produced keys. Collisions are last-write-wins in
/// the order `results` arrives.
pub fn aggregate(
    results: &[ExtractionResult],
    default_namespace: Option<&str>,
) -> Result<FilteredKeys, ExtractError> {
    let mut buckets: HashMap<Namespace, HashMap<String, Option<String>>> = HashMap::new();

    for result in results {
        for key in &result.keys {
            if key.key_name.is_empty() {
                return Err(ExtractError::Aggregation {
                    message: format!(
                        "empty key name in results for '{}'",
                        result.file.display()
                    ),
                });
            }

            let namespace = match key.namespace.as_deref().or(default_namespace) {
                Some(name) => Namespace::named(name),
                None => Namespace::None,
            };

            buckets
                .entry(namespace)
                .or_default()
                .insert(key.key_name.clone(), key.default_value.clone());
        }
    }

    Ok(FilteredKeys { buckets })
}
