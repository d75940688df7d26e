use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use glob::glob;
use walkdir::WalkDir;

use crate::error::ExtractError;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths. Config
/// validation uses the same rule so the two cannot drift apart.
pub(crate) fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Expand glob patterns into a deduplicated list of regular files.
///
/// Patterns with wildcards are expanded via glob matching; literal patterns
/// name either a single file or a directory to walk recursively. Directories
/// themselves are never returned. Order of the returned list is unspecified.
///
/// Read-only: discovery never touches the files it returns.
pub fn discover_files(patterns: &[String]) -> Result<Vec<PathBuf>, ExtractError> {
    let mut files: HashSet<PathBuf> = HashSet::new();

    for pattern in patterns {
        if is_glob_pattern(pattern) {
            expand_glob(pattern, &mut files)?;
        } else {
            expand_literal(Path::new(pattern), &mut files)?;
        }
    }

    Ok(files.into_iter().collect())
}

fn expand_glob(pattern: &str, files: &mut HashSet<PathBuf>) -> Result<(), ExtractError> {
    let entries = glob(pattern)
        .map_err(|e| ExtractError::discovery(format!("invalid pattern '{}': {}", pattern, e)))?;

    for entry in entries {
        let path = entry.map_err(|e| {
            ExtractError::discovery(format!("cannot access '{}': {}", e.path().display(), e))
        })?;
        if path.is_file() {
            files.insert(path);
        }
    }
    Ok(())
}

fn expand_literal(path: &Path, files: &mut HashSet<PathBuf>) -> Result<(), ExtractError> {
    if path.is_file() {
        files.insert(path.to_path_buf());
        return Ok(());
    }
    if !path.is_dir() {
        // Nonexistent literal paths match nothing, same as an empty glob.
        return Ok(());
    }

    for entry in WalkDir::new(path) {
        let entry = entry
            .map_err(|e| ExtractError::discovery(format!("cannot access path: {}", e)))?;
        if entry.file_type().is_file() {
            files.insert(entry.into_path());
        }
    }
    Ok(())
}
