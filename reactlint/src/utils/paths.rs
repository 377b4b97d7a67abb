//! Path utilities for reactlint.
//!
//! This module consolidates all path-related logic for:
//! - Cross-platform path normalization
//! - Source file discovery with gitignore support

use crate::constants::{get_default_exclude_folders, SOURCE_EXTENSIONS};
use std::path::{Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use reactlint::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\App.tsx")), "src/App.tsx");
/// assert_eq!(normalize_display_path(Path::new("./src/index.ts")), "src/index.ts");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Collects TypeScript/JavaScript source files using gitignore-aware walking.
///
/// Excluded directories are pruned during traversal, so `node_modules` and
/// friends are never descended into. A `root` that is itself a file is
/// returned as-is when it has a source extension.
///
/// # Arguments
/// * `root` - Root directory to search
/// * `exclude` - Additional user-specified exclusion patterns
///
/// # Returns
/// Sorted vector of the source files found
#[must_use]
pub fn collect_source_files_gitignore(root: &Path, exclude: &[String]) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    if root.is_file() {
        return if is_source_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    // Merge user excludes with default excludes
    let excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(get_default_exclude_folders().iter().map(|&s| s.to_owned()))
        .collect();
    let root_for_filter = root.to_path_buf();

    let walker = WalkBuilder::new(root)
        .hidden(false) // Don't skip hidden files (we handle that with defaults)
        .git_ignore(true) // Respect .gitignore files
        .git_global(true) // Respect global gitignore
        .git_exclude(true) // Respect .git/info/exclude
        .require_git(false)
        .filter_entry(move |entry| {
            // Always allow the root directory
            if entry.path() == root_for_filter {
                return true;
            }
            // Only filter directories - files are checked below
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &excludes))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_file()) && is_source_file(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => log::debug!("walk error: {e}"),
        }
    }
    files.sort();
    files
}
