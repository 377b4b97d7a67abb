//! Utilities module for reactlint.
//!
//! This module provides various utility functions used across the codebase.

mod paths;

pub use paths::{collect_source_files_gitignore, is_excluded, normalize_display_path};

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::hash_map::Entry;

/// A utility struct to convert byte offsets to line and column numbers.
///
/// Rules report byte spans, but findings are printed with line numbers
/// which are more human-readable.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        // '\n' is always a single byte in UTF-8
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a 1-indexed (line, column) pair. Columns
    /// count characters, not bytes.
    #[must_use]
    pub fn line_col(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.line_index(offset);
        let start = self.line_starts[line - 1];
        let column = source
            .get(start..offset.min(source.len()))
            .map_or(0, |prefix| prefix.chars().count());
        (line, column + 1)
    }
}

/// Suppression specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suppression {
    /// Suppress all findings.
    All,
    /// Suppress findings for specific rule IDs.
    Specific(FxHashSet<String>),
}

impl Suppression {
    /// Whether this suppression covers `rule_id`.
    #[must_use]
    pub fn covers(&self, rule_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Specific(ids) => ids.contains(rule_id),
        }
    }
}

/// Detects the line suppressed by a comment on `line`, if any.
///
/// Supported forms:
/// - `// reactlint-disable-line` - this line, every rule
/// - `// reactlint-disable-next-line sort-interfaces` - next line, listed rules
///
/// Returns the offset (0 for this line, 1 for the next) and what is suppressed.
#[must_use]
pub fn get_line_suppression(line: &str) -> Option<(usize, Suppression)> {
    let caps = crate::constants::SUPPRESSION_RE().captures(line)?;
    let offset = usize::from(&caps[1] == "next-line");
    let ids: FxHashSet<String> = caps
        .get(2)
        .map_or("", |m| m.as_str())
        .split([',', ' ', '\t'])
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect();
    let suppression = if ids.is_empty() {
        Suppression::All
    } else {
        Suppression::Specific(ids)
    };
    Some((offset, suppression))
}

/// Collects suppressions by 1-indexed line number.
#[must_use]
pub fn get_ignored_lines(source: &str) -> FxHashMap<usize, Suppression> {
    let mut ignored: FxHashMap<usize, Suppression> = FxHashMap::default();
    for (i, line) in source.lines().enumerate() {
        let Some((offset, suppression)) = get_line_suppression(line) else {
            continue;
        };
        let target = i + 1 + offset;
        match ignored.entry(target) {
            Entry::Vacant(slot) => {
                slot.insert(suppression);
            }
            Entry::Occupied(mut slot) => match (slot.get_mut(), suppression) {
                (Suppression::Specific(existing), Suppression::Specific(more)) => {
                    existing.extend(more);
                }
                (existing, Suppression::All) => *existing = Suppression::All,
                (Suppression::All, Suppression::Specific(_)) => {}
            },
        }
    }
    ignored
}
