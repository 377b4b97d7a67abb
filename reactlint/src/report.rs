//! Aggregated results of a lint run over many files.
//!
//! The engine reports byte spans per file; the host turns them into
//! [`Finding`]s with a display path and a line/column so they can be printed
//! or serialised.

use crate::diagnostic::Diagnostic;
use crate::utils::LineIndex;
use serde::Serialize;

/// A diagnostic located in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Display path of the file
    pub file: String,
    /// 1-indexed line of the diagnostic start
    pub line: usize,
    /// 1-indexed column of the diagnostic start, in characters
    pub column: usize,
    /// The engine's diagnostic
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

impl Finding {
    /// Locate `diagnostic` in `source` using a prebuilt line index.
    #[must_use]
    pub fn locate(file: &str, source: &str, index: &LineIndex, diagnostic: Diagnostic) -> Self {
        let (line, column) = index.line_col(source, diagnostic.span.start);
        Self {
            file: file.to_owned(),
            line,
            column,
            diagnostic,
        }
    }

    /// Whether the diagnostic carries a fix.
    #[must_use]
    pub fn is_fixable(&self) -> bool {
        self.diagnostic.has_fix()
    }
}

/// A file that could not be analysed or fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    /// Display path of the file
    pub file: String,
    /// What went wrong
    pub error: String,
}

/// Outcome for a single file.
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    /// Diagnostics still present
    pub findings: Vec<Finding>,
    /// Set when fixes were applied (or would be, on a dry run)
    pub fixed: Option<FixedFile>,
    /// Set when the fix batch was rejected
    pub rejected_fix: Option<FileError>,
    /// Set when the file could not be read or parsed
    pub error: Option<FileError>,
}

/// A file rewritten by `--fix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedFile {
    /// Display path of the file
    pub file: String,
    /// Number of diagnostics whose fixes were applied
    pub fixes_applied: usize,
}

/// Everything a run produced, in file order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    /// Number of files handed to the linter
    pub files_analyzed: usize,
    /// Remaining diagnostics
    pub findings: Vec<Finding>,
    /// Files changed by fixes
    pub fixed_files: Vec<FixedFile>,
    /// Files whose fix batch was rejected
    pub rejected_fixes: Vec<FileError>,
    /// Files that could not be processed
    pub errors: Vec<FileError>,
}

impl LintReport {
    /// Fold per-file outcomes into one report, preserving their order.
    #[must_use]
    pub fn from_files(files: Vec<FileReport>) -> Self {
        let mut report = Self {
            files_analyzed: files.len(),
            ..Self::default()
        };
        for file in files {
            report.findings.extend(file.findings);
            report.fixed_files.extend(file.fixed);
            report.rejected_fixes.extend(file.rejected_fix);
            report.errors.extend(file.error);
        }
        report
    }

    /// Number of remaining findings that carry a fix.
    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_fixable()).count()
    }

    /// No findings and no failed files.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.errors.is_empty()
    }
}
