//! Reporting contract between rules and hosts.

use crate::error::LintError;
use crate::span::Span;
use serde::Serialize;

/// Delete the text in `span` and insert `new_text` in its place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    /// Text being replaced
    pub span: Span,
    /// Text inserted instead
    pub new_text: String,
}

impl Replacement {
    /// Create a replacement.
    #[must_use]
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }
}

/// One reported issue, optionally carrying a fix.
///
/// Replacements are always sorted by start offset and pairwise
/// non-overlapping; [`Diagnostic::with_replacements`] enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Id of the rule that produced the diagnostic
    pub rule_id: &'static str,
    /// Location being reported
    pub span: Span,
    /// Human readable description
    pub message: String,
    /// Text substitutions fixing the issue
    #[serde(rename = "fixes")]
    pub replacements: Vec<Replacement>,
}

impl Diagnostic {
    /// A diagnostic without a fix.
    #[must_use]
    pub fn new(rule_id: &'static str, span: Span, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            span,
            message: message.into(),
            replacements: Vec::new(),
        }
    }

    /// Attach a fix, sorting it and rejecting overlapping replacements.
    ///
    /// # Errors
    /// Returns [`LintError::OverlappingReplacements`] if two replacements intersect
    pub fn with_replacements(mut self, mut replacements: Vec<Replacement>) -> Result<Self, LintError> {
        normalize_replacements(&mut replacements)?;
        self.replacements = replacements;
        Ok(self)
    }

    /// Whether the diagnostic carries a fix.
    #[must_use]
    pub fn has_fix(&self) -> bool {
        !self.replacements.is_empty()
    }
}

/// Sort replacements by start offset and verify that none intersect.
///
/// Two replacements starting at the same offset also conflict, since their
/// relative order would be ambiguous.
///
/// # Errors
/// Returns [`LintError::OverlappingReplacements`] naming the first conflicting pair
pub fn normalize_replacements(replacements: &mut [Replacement]) -> Result<(), LintError> {
    replacements.sort_by_key(|r| (r.span.start, r.span.end));
    for pair in replacements.windows(2) {
        let (first, second) = (pair[0].span, pair[1].span);
        if second.start < first.end || second.start == first.start {
            return Err(LintError::OverlappingReplacements { first, second });
        }
    }
    Ok(())
}
