//! Helpers shared by unit and integration tests.

use crate::diagnostic::Diagnostic;
use crate::error::LintError;
use crate::rules::Rule;
use crate::tree::{Dialect, NodeRef, SourceParser, TreeView};
use crate::types::{TypeInfo, TypeOracle};
use rustc_hash::FxHashMap;

/// Parse `source` with the TSX dialect, which accepts both plain
/// TypeScript and JSX.
///
/// # Errors
/// Returns error if the parser cannot be created or produces no tree
pub fn parse_tsx(source: &str) -> Result<TreeView, LintError> {
    SourceParser::new(Dialect::Tsx)?.parse(source)
}

/// Parse `source` as TSX and run a single rule over it.
///
/// # Errors
/// Returns error if parsing fails or the rule cannot run with `types`
pub fn run_rule(
    rule: &Rule,
    source: &str,
    types: Option<&dyn TypeOracle>,
) -> Result<Vec<Diagnostic>, LintError> {
    let tree = parse_tsx(source)?;
    rule.apply(&tree, types)
}

/// Oracle answering by the exact source text of the queried node.
///
/// Handy in tests where computing byte offsets by hand is noisy.
#[derive(Debug, Clone, Default)]
pub struct TextTypeOracle {
    by_text: FxHashMap<String, TypeInfo>,
}

impl TextTypeOracle {
    /// Empty oracle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `info` for every node whose text is `text`.
    #[must_use]
    pub fn with(mut self, text: &str, info: TypeInfo) -> Self {
        self.by_text.insert(text.to_owned(), info);
        self
    }
}

impl TypeOracle for TextTypeOracle {
    fn type_at(&self, node: NodeRef<'_>) -> Option<TypeInfo> {
        self.by_text.get(node.text()).cloned()
    }
}
