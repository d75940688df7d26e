use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::extraction::discovery::is_glob_pattern;

pub const CONFIG_FILE_NAME: &str = ".keyliftrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns selecting the files to scan.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
    /// Namespace for keys without an explicit one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_namespace: Option<String>,
    /// Path to a custom extractor module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<PathBuf>,
    /// Worker limit; hardware parallelism (capped) when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
}

fn default_patterns() -> Vec<String> {
    ["src/**/*.ts", "src/**/*.tsx", "src/**/*.js", "src/**/*.jsx"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            default_namespace: None,
            extractor: None,
            concurrency: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `patterns` is invalid.
    /// Patterns without wildcards are literal paths and always valid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.patterns {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'patterns': \"{}\"", pattern)
                })?;
            }
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.patterns.is_empty());
        assert!(config.default_namespace.is_none());
        assert!(config.extractor.is_none());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "patterns": ["app/**/*.tsx"],
              "defaultNamespace": "app",
              "concurrency": 4
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.patterns, vec!["app/**/*.tsx"]);
        assert_eq!(config.default_namespace.as_deref(), Some("app"));
        assert_eq!(config.concurrency, Some(4));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "defaultNamespace": "app" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_namespace.as_deref(), Some("app"));
        assert_eq!(config.patterns, default_patterns());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "patterns": ["pages/**/*.ts"] }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.patterns, vec!["pages/**/*.ts"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.patterns, default_patterns());
    }

    #[test]
    fn test_validate_invalid_pattern() {
        let config = Config {
            patterns: vec!["src/**/[invalid".to_string()], // unclosed bracket with glob wildcard
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("patterns"));
    }

    #[test]
    fn test_validate_literal_bracket_path_is_valid() {
        // [locale] without wildcards is treated as a literal path, not a glob
        let config = Config {
            patterns: vec!["app/[locale]".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_follows_discovery_wildcard_rule() {
        // Validation and discovery share one wildcard check, so a pattern
        // accepted here as literal is also walked literally.
        assert!(!is_glob_pattern("app/[locale]"));
        assert!(is_glob_pattern("app/[locale]/**"));

        let config = Config {
            patterns: vec!["app/[locale]".to_string(), "src/**/*.ts".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "patterns": ["[invalid/*"] }"#).unwrap();

        let result = load_config(dir.path());
        assert!(result.is_err());
    }
}
