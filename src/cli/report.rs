//! Output rendering for the `extract` command.
//!
//! This module is separate from the core library logic so keylift can be
//! used as a library without printing side effects. The JSON shape here is
//! the CLI's own rendering of `FilteredKeys`; the upload collaborator owns
//! the platform wire format.

use colored::Colorize;
use serde_json::{Map, Value, json};

use crate::error::ExtractError;
use crate::extraction::FilteredKeys;

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Failure mark for consistent output formatting
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Render the key map as JSON: one object per namespace, the null
/// namespace rendered as JSON `null` (which stays distinct from a
/// namespace literally named "null").
pub fn render_json(keys: &FilteredKeys) -> Value {
    let mut namespaces: Vec<_> = keys.iter().collect();
    // Stable output for humans and diffs; the null namespace sorts first.
    namespaces.sort_by_key(|(ns, _)| ns.name().map(str::to_owned));

    let rendered: Vec<Value> = namespaces
        .into_iter()
        .map(|(ns, bucket)| {
            let mut entries: Vec<_> = bucket.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let mut key_map = Map::new();
            for (name, value) in entries {
                key_map.insert(
                    name.clone(),
                    value.as_deref().map(Value::from).unwrap_or(Value::Null),
                );
            }

            json!({
                "namespace": ns.name(),
                "keys": key_map,
            })
        })
        .collect();

    Value::Array(rendered)
}

/// Print the extracted map to stdout and a summary to stderr.
pub fn print_keys(keys: &FilteredKeys) {
    println!("{:#}", render_json(keys));
    eprintln!(
        "{} Extracted {} key(s) across {} namespace(s)",
        SUCCESS_MARK.green(),
        keys.key_count(),
        keys.namespace_count()
    );
}

/// Print an extraction failure. The error's display already names the
/// failing file for per-file errors.
pub fn print_error(err: &ExtractError) {
    eprintln!("{} {}", FAILURE_MARK.red(), err);
}
