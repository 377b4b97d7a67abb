//! Byte-range safe application of replacements.
//!
//! A batch of replacements is applied all-or-nothing: if any two of them
//! overlap, or one addresses text outside the source, nothing is applied.
//!
//! # Usage
//!
//! ```
//! use reactlint::diagnostic::Replacement;
//! use reactlint::fix::ByteRangeRewriter;
//! use reactlint::span::Span;
//!
//! let source = "hello world";
//! let mut rewriter = ByteRangeRewriter::new(source);
//! rewriter.add_replacement(Replacement::new(Span::new(0, 5), "hi"));
//! let fixed = rewriter.apply().expect("should apply");
//! assert_eq!(fixed, "hi world");
//! ```

use crate::diagnostic::{normalize_replacements, Diagnostic, Replacement};
use crate::error::LintError;

/// Safe code rewriter using byte ranges
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    /// Original source code
    source: String,
    /// Pending replacements
    replacements: Vec<Replacement>,
}

impl ByteRangeRewriter {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            replacements: Vec::new(),
        }
    }

    /// Add a replacement to the pending batch
    pub fn add_replacement(&mut self, replacement: Replacement) {
        self.replacements.push(replacement);
    }

    /// Add multiple replacements
    pub fn add_replacements(&mut self, replacements: impl IntoIterator<Item = Replacement>) {
        self.replacements.extend(replacements);
    }

    /// Get the number of pending replacements
    #[must_use]
    pub fn replacement_count(&self) -> usize {
        self.replacements.len()
    }

    /// Check if there are any pending replacements
    #[must_use]
    pub fn has_replacements(&self) -> bool {
        !self.replacements.is_empty()
    }

    /// Validate the batch without applying it
    ///
    /// # Errors
    /// Returns error if replacements overlap, are out of bounds, or split a character
    pub fn validate(&self) -> Result<(), LintError> {
        for replacement in &self.replacements {
            if replacement.span.slice(&self.source).is_none() {
                return Err(LintError::ReplacementOutOfBounds {
                    span: replacement.span,
                    source_len: self.source.len(),
                });
            }
        }
        let mut sorted = self.replacements.clone();
        normalize_replacements(&mut sorted)
    }

    /// Apply the batch and return the rewritten source
    ///
    /// The text between replacements is copied unchanged, so surrounding
    /// whitespace and comments survive byte for byte.
    ///
    /// # Errors
    /// Returns error if replacements overlap, are out of bounds, or split a character
    pub fn apply(self) -> Result<String, LintError> {
        self.validate()?;

        let mut sorted = self.replacements;
        normalize_replacements(&mut sorted)?;

        let added: usize = sorted.iter().map(|r| r.new_text.len()).sum();
        let mut result = String::with_capacity(self.source.len() + added);
        let mut cursor = 0;
        for replacement in &sorted {
            result.push_str(&self.source[cursor..replacement.span.start]);
            result.push_str(&replacement.new_text);
            cursor = replacement.span.end;
        }
        result.push_str(&self.source[cursor..]);
        Ok(result)
    }
}

/// Apply every fix carried by `diagnostics` to `source` as one batch.
///
/// # Errors
/// Returns error if any two replacements in the batch overlap or are invalid;
/// nothing is applied in that case
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> Result<String, LintError> {
    let mut rewriter = ByteRangeRewriter::new(source);
    for diagnostic in diagnostics {
        rewriter.add_replacements(diagnostic.replacements.iter().cloned());
    }
    rewriter.apply()
}
