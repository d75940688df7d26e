//! Built-in extractor for the supported source dialects.
//!
//! Recognizes three shapes, in document order:
//!
//! - `useTranslate('ns')` / `getTranslate('ns')`: binds the namespace for
//!   subsequent `t()` calls in the same file
//! - `t('key')` / `t('key', 'Default value')`: a key usage
//! - `<T keyName="key" defaultValue="..." ns="..." />`: a marker component
//!
//! Files with an unsupported extension yield an empty key list; discovery
//! does not filter by extension because a custom extractor may handle
//! anything.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use super::Extract;
use crate::extraction::keys::ExtractedKey;

/// Source dialects the built-in extractor understands.
const SUPPORTED_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "vue", "svelte"];

static NAMESPACE_BIND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:useTranslate|getTranslate)\(\s*(?:['"]([^'"]*)['"])?\s*\)"#).unwrap()
});

static T_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bt\(\s*['"]([^'"]+)['"](?:\s*,\s*['"]([^'"]*)['"])?"#).unwrap()
});

// [^>]* deliberately matches newlines so multi-line markers are caught.
static T_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<T\b([^>]*?)/?>").unwrap());

static KEY_NAME_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bkeyName\s*=\s*["']([^"']+)["']"#).unwrap());

static DEFAULT_VALUE_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdefaultValue\s*=\s*["']([^"']*)["']"#).unwrap());

static NS_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bns\s*=\s*["']([^"']*)["']"#).unwrap());

/// The built-in extraction strategy.
#[derive(Debug, Default)]
pub struct BuiltinExtractor;

enum Event {
    /// `useTranslate`/`getTranslate` binding; `None` clears the namespace.
    Bind(Option<String>),
    Key(ExtractedKey),
}

impl Extract for BuiltinExtractor {
    fn extract(&self, file: &Path, source: &str) -> Result<Vec<ExtractedKey>> {
        if !is_supported_dialect(file) {
            return Ok(Vec::new());
        }

        // Collect matches from all patterns, then replay them in document
        // order so namespace bindings apply to the calls that follow them.
        let mut events: Vec<(usize, Event)> = Vec::new();

        for caps in NAMESPACE_BIND_REGEX.captures_iter(source) {
            let offset = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let namespace = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .filter(|ns| !ns.is_empty());
            events.push((offset, Event::Bind(namespace)));
        }

        for caps in T_CALL_REGEX.captures_iter(source) {
            let m = match caps.get(1) {
                Some(m) => m,
                None => continue,
            };
            let mut key = ExtractedKey::new(m.as_str()).at_line(line_of(source, m.start()));
            if let Some(value) = caps.get(2) {
                key = key.with_default_value(value.as_str());
            }
            events.push((m.start(), Event::Key(key)));
        }

        for caps in T_MARKER_REGEX.captures_iter(source) {
            let attrs = match caps.get(1) {
                Some(m) => m,
                None => continue,
            };
            let Some(name) = KEY_NAME_ATTR_REGEX
                .captures(attrs.as_str())
                .and_then(|c| c.get(1))
            else {
                continue;
            };
            let mut key = ExtractedKey::new(name.as_str()).at_line(line_of(source, attrs.start()));
            if let Some(value) = DEFAULT_VALUE_ATTR_REGEX
                .captures(attrs.as_str())
                .and_then(|c| c.get(1))
            {
                key = key.with_default_value(value.as_str());
            }
            if let Some(ns) = NS_ATTR_REGEX.captures(attrs.as_str()).and_then(|c| c.get(1)) {
                key = key.with_namespace(ns.as_str());
            }
            events.push((attrs.start(), Event::Key(key)));
        }

        events.sort_by_key(|(offset, _)| *offset);

        let mut keys = Vec::new();
        let mut bound_namespace: Option<String> = None;
        for (_, event) in events {
            match event {
                Event::Bind(namespace) => bound_namespace = namespace,
                Event::Key(mut key) => {
                    if key.namespace.is_none() {
                        key.namespace = bound_namespace.clone();
                    }
                    keys.push(key);
                }
            }
        }

        Ok(keys)
    }
}

fn is_supported_dialect(file: &Path) -> bool {
    file.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// 1-based line number of a byte offset.
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn extract(file: &str, source: &str) -> Vec<ExtractedKey> {
        BuiltinExtractor
            .extract(Path::new(file), source)
            .unwrap()
    }

    #[test]
    fn test_plain_t_call() {
        let keys = extract("app.ts", "const label = t('hello');");
        assert_eq!(keys, vec![ExtractedKey::new("hello").at_line(1)]);
    }

    #[test]
    fn test_t_call_with_default_value() {
        let keys = extract("app.tsx", "t('hello', 'Hello there')");
        assert_eq!(
            keys,
            vec![
                ExtractedKey::new("hello")
                    .with_default_value("Hello there")
                    .at_line(1)
            ]
        );
    }

    #[test]
    fn test_use_translate_binds_namespace() {
        let source = "const t = useTranslate('common');\nt('submit', 'Submit');\n";
        let keys = extract("form.tsx", source);
        assert_eq!(
            keys,
            vec![
                ExtractedKey::new("submit")
                    .with_namespace("common")
                    .with_default_value("Submit")
                    .at_line(2)
            ]
        );
    }

    #[test]
    fn test_bare_use_translate_clears_namespace() {
        let source = "useTranslate('common');\nt('a');\nuseTranslate();\nt('b');\n";
        let keys = extract("page.ts", source);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].namespace.as_deref(), Some("common"));
        assert_eq!(keys[1].namespace, None);
    }

    #[test]
    fn test_marker_component() {
        let source = r#"<T keyName="welcome" defaultValue="Welcome!" ns="landing" />"#;
        let keys = extract("Hero.tsx", source);
        assert_eq!(
            keys,
            vec![
                ExtractedKey::new("welcome")
                    .with_namespace("landing")
                    .with_default_value("Welcome!")
                    .at_line(1)
            ]
        );
    }

    #[test]
    fn test_marker_explicit_ns_wins_over_binding() {
        let source = "useTranslate('common');\n<T keyName=\"x\" ns=\"other\" />";
        let keys = extract("App.jsx", source);
        assert_eq!(keys[0].namespace.as_deref(), Some("other"));
    }

    #[test]
    fn test_multiline_marker() {
        let source = "<T\n  keyName=\"spread\"\n  defaultValue=\"Across lines\"\n/>";
        let keys = extract("Multi.tsx", source);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key_name, "spread");
        assert_eq!(keys[0].default_value.as_deref(), Some("Across lines"));
    }

    #[test]
    fn test_unsupported_extension_yields_nothing() {
        let keys = extract("README.md", "t('not.a.key')");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_keys_in_source_order() {
        let source = "t('first');\nt('second');\nt('third');";
        let keys = extract("order.ts", source);
        let names: Vec<_> = keys.iter().map(|k| k.key_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_word_boundary_does_not_match_other_calls() {
        let keys = extract("misc.ts", "result.split(',');\nformat('x');");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_line_numbers() {
        let source = "\n\nt('down.here');\n";
        let keys = extract("lines.ts", source);
        assert_eq!(keys[0].line, Some(3));
    }
}
