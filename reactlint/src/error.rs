//! Error kinds raised by the analysis engine.

use crate::span::Span;
use crate::tree::OffsetEncoding;

/// Errors produced while building trees, running rules or applying fixes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LintError {
    /// A node's span is not contained in its parent's span.
    #[error("node {node} has span {span} outside its parent span {parent}")]
    MalformedSpan {
        /// Index of the offending node
        node: usize,
        /// Span of the offending node
        span: Span,
        /// Span of its parent
        parent: Span,
    },
    /// Two replacements proposed for the same text intersect.
    #[error("replacements at {first} and {second} overlap")]
    OverlappingReplacements {
        /// The earlier replacement span
        first: Span,
        /// The later replacement span
        second: Span,
    },
    /// A rule that needs type information ran without a type oracle.
    #[error("rule `{rule}` requires type information but no type oracle was supplied")]
    OracleUnavailable {
        /// Identifier of the rule
        rule: &'static str,
    },
    /// An offset does not land on a character boundary in the declared encoding.
    #[error("offset {offset} ({encoding:?}) does not fall on a character boundary of the source")]
    UnicodeOffsetMismatch {
        /// The offending offset, as supplied
        offset: usize,
        /// Encoding the offset was expressed in
        encoding: OffsetEncoding,
    },
    /// A target order is not a permutation of the original positions.
    #[error("target order of length {got} is not a permutation of {expected} positions")]
    InvalidPermutation {
        /// Number of original positions
        expected: usize,
        /// Length of the proposed order
        got: usize,
    },
    /// A replacement addresses text outside the source or splits a character.
    #[error("replacement span {span} is not valid for a source of {source_len} bytes")]
    ReplacementOutOfBounds {
        /// The replacement span
        span: Span,
        /// Length of the source text
        source_len: usize,
    },
    /// The parser could not be set up or produced no tree.
    #[error("parser error: {0}")]
    Parser(String),
    /// A rule id that is not registered.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}
