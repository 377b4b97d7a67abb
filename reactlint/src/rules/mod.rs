use crate::diagnostic::Diagnostic;
use crate::error::LintError;
use crate::fix::{synthesize, Slot};
use crate::span::Span;
use crate::tree::{NodeRef, TreeView};
use crate::types::TypeOracle;
use serde::Serialize;

/// Category of rules that catch behavioural bugs.
pub const CAT_FUNCTIONALITY: &str = "functionality";
/// Category of rules about formatting and ordering.
pub const CAT_STYLE: &str = "style";
/// Category of rules that keep declarations easy to maintain.
pub const CAT_MAINTAINABILITY: &str = "maintainability";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Metadata associated with a rule.
pub struct RuleMetadata {
    /// Stable identifier of the rule.
    pub id: &'static str,
    /// Human readable description.
    pub description: &'static str,
    /// Category of the rule.
    pub category: &'static str,
    /// Whether the rule needs a type oracle.
    pub requires_type_info: bool,
    /// Whether the rule proposes replacements.
    pub produces_fix: bool,
}

/// A rule that only looks at syntax.
///
/// `check` is called once per node in pre-order. Rules are pure: they may
/// not keep node handles beyond the call.
pub trait SyntacticRule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the full metadata for the rule.
    fn metadata(&self) -> RuleMetadata;
    /// Called for every well-formed node of the tree.
    fn check(&self, node: NodeRef<'_>) -> Option<Vec<Diagnostic>>;
}

/// A rule that queries a [`TypeOracle`].
pub trait SemanticRule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the full metadata for the rule.
    fn metadata(&self) -> RuleMetadata;
    /// Called for every well-formed node of the tree.
    fn check(&self, node: NodeRef<'_>, types: &dyn TypeOracle) -> Option<Vec<Diagnostic>>;
}

/// A registered rule of either capability.
pub enum Rule {
    /// Needs only the tree
    Syntactic(Box<dyn SyntacticRule>),
    /// Needs the tree and a type oracle
    Semantic(Box<dyn SemanticRule>),
}

impl Rule {
    /// Returns the full metadata for the rule.
    #[must_use]
    pub fn metadata(&self) -> RuleMetadata {
        match self {
            Self::Syntactic(rule) => rule.metadata(),
            Self::Semantic(rule) => RuleMetadata {
                requires_type_info: true,
                ..rule.metadata()
            },
        }
    }

    /// Returns the descriptive name of the rule.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Syntactic(rule) => rule.name(),
            Self::Semantic(rule) => rule.name(),
        }
    }

    /// Returns the unique id of the rule.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.metadata().id
    }

    /// Whether the host must supply a type oracle.
    #[must_use]
    pub fn requires_type_info(&self) -> bool {
        matches!(self, Self::Semantic(_))
    }

    /// Fail fast if this rule cannot run with the given oracle.
    ///
    /// # Errors
    /// Returns [`LintError::OracleUnavailable`] for a semantic rule without an oracle
    pub fn ensure_runnable(&self, types: Option<&dyn TypeOracle>) -> Result<(), LintError> {
        if self.requires_type_info() && types.is_none() {
            return Err(LintError::OracleUnavailable { rule: self.id() });
        }
        Ok(())
    }

    /// Run the rule over the whole tree.
    ///
    /// Malformed nodes are skipped (and logged); their subtrees are still
    /// visited. Diagnostics come out in traversal order.
    ///
    /// # Errors
    /// Returns [`LintError::OracleUnavailable`] before any traversal if a
    /// semantic rule is given no oracle
    pub fn apply(
        &self,
        tree: &TreeView,
        types: Option<&dyn TypeOracle>,
    ) -> Result<Vec<Diagnostic>, LintError> {
        self.ensure_runnable(types)?;
        let id = self.id();
        let mut diagnostics = Vec::new();
        tree.walk(tree.root(), |node| {
            if node.is_malformed() {
                log::warn!(
                    "{id}: skipping node {} with malformed span {}",
                    node.id().index(),
                    node.span()
                );
                return;
            }
            let found = match (self, types) {
                (Self::Syntactic(rule), _) => rule.check(node),
                (Self::Semantic(rule), Some(types)) => rule.check(node, types),
                (Self::Semantic(_), None) => None,
            };
            if let Some(mut found) = found {
                diagnostics.append(&mut found);
            }
        });
        Ok(diagnostics)
    }
}

/// Diagnostic for a sibling sequence that is out of order, carrying the
/// replacements that rearrange `slots` into `order`.
///
/// If no valid fix can be built the diagnostic is still reported, without one.
pub(crate) fn reorder_diagnostic(
    rule_id: &'static str,
    anchor: Span,
    message: impl Into<String>,
    slots: &[Slot<'_>],
    order: &[usize],
) -> Diagnostic {
    let mut diagnostic = Diagnostic::new(rule_id, anchor, message);
    match synthesize(slots, order) {
        // Already sorted by start and pairwise disjoint
        Ok(replacements) => diagnostic.replacements = replacements,
        Err(e) => log::warn!("{rule_id}: fix unavailable at {anchor}: {e}"),
    }
    diagnostic
}

/// Module containing rule ID constants.
pub mod ids;
/// Module containing React component rules.
pub mod react;
/// Module mapping rule ids to implementations.
pub mod registry;
/// Module containing TypeScript language rules.
pub mod typescript;

pub use registry::RuleRegistry;
