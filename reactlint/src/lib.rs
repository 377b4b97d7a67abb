//! Core library for the reactlint static analysis engine.
//!
//! Rules inspect a read-only [`tree::TreeView`] of a TypeScript or TSX
//! source, report [`diagnostic::Diagnostic`]s and optionally propose text
//! [`diagnostic::Replacement`]s that the [`fix`] module applies as one batch.
//! Rules that need type information receive a [`types::TypeOracle`] supplied
//! by the host.

#![allow(clippy::similar_names, clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Half-open byte ranges into source text.
pub mod span;

/// Read-only syntax trees, node kinds and the tree-sitter frontend.
pub mod tree;

/// Type oracle interface, type flags and fact-backed oracles.
pub mod types;

/// Diagnostics and the replacements that fix them.
pub mod diagnostic;

/// Member sorting, replacement synthesis and batch rewriting.
pub mod fix;

/// Rule contract, registry and the built-in rules.
pub mod rules;

/// One analysis pass of many rules over one tree.
pub mod linter;

/// Error kinds of the engine.
pub mod error;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants.
pub mod constants;

/// Module containing utility functions.
/// This includes line indexing, suppression comments and file discovery.
pub mod utils;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module defining the entry point logic shared by the binary and tests.
pub mod entry_point;

/// Aggregated results of a run over many files.
pub mod report;

/// Module for CLI output formatting with colored text and tables.
pub mod output;

/// Module containing test utilities.
/// This helps in writing tests for rules and the linter.
pub mod test_utils;

pub use diagnostic::{Diagnostic, Replacement};
pub use error::LintError;
pub use linter::{FixOutcome, Linter};
pub use rules::{Rule, RuleRegistry, SemanticRule, SyntacticRule};
pub use span::Span;
pub use tree::{NodeRef, TreeView};
pub use types::TypeOracle;
