//! One analysis pass: every selected rule over one tree.

use crate::diagnostic::Diagnostic;
use crate::error::LintError;
use crate::fix::apply_fixes;
use crate::rules::RuleRegistry;
use crate::tree::{Dialect, SourceParser, TreeView};
use crate::types::{CachedOracle, TypeOracle};
use rayon::prelude::*;

/// Runs the rules of a registry against syntax trees.
#[derive(Debug)]
pub struct Linter {
    registry: RuleRegistry,
}

/// Result of a lint-and-fix pass over one source file.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// The original source text
    pub source: String,
    /// Rewritten text, `None` when nothing was applied
    pub fixed: Option<String>,
    /// Every diagnostic of the pass, with or without fixes
    pub diagnostics: Vec<Diagnostic>,
    /// Why the fix batch was rejected, if it was
    pub rejected: Option<LintError>,
}

impl FixOutcome {
    /// Apply the fixes of `diagnostics` to `source` as one batch.
    ///
    /// Hosts that filter diagnostics (for example by suppression comments)
    /// call this directly with what is left.
    #[must_use]
    pub fn apply(source: &str, diagnostics: Vec<Diagnostic>) -> Self {
        let mut outcome = Self {
            source: source.to_owned(),
            fixed: None,
            diagnostics,
            rejected: None,
        };
        if !outcome.diagnostics.iter().any(Diagnostic::has_fix) {
            return outcome;
        }
        match apply_fixes(source, &outcome.diagnostics) {
            Ok(fixed) => outcome.fixed = Some(fixed),
            Err(e) => {
                log::warn!("fix batch rejected: {e}");
                outcome.rejected = Some(e);
            }
        }
        outcome
    }

    /// Number of diagnostics whose fixes went into `fixed`.
    #[must_use]
    pub fn fixes_applied(&self) -> usize {
        if self.fixed.is_some() {
            self.diagnostics.iter().filter(|d| d.has_fix()).count()
        } else {
            0
        }
    }

    /// The text after fixing, or the original text if nothing was applied.
    #[must_use]
    pub fn output(&self) -> &str {
        self.fixed.as_deref().unwrap_or(&self.source)
    }

    /// Whether fixes changed the text.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.fixed.as_deref().is_some_and(|fixed| fixed != self.source)
    }
}

impl Linter {
    /// Creates a linter over `registry`.
    #[must_use]
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// The rules this linter runs.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Whether any selected rule needs a type oracle.
    #[must_use]
    pub fn requires_type_info(&self) -> bool {
        self.registry.iter().any(|rule| rule.requires_type_info())
    }

    /// Run every rule over `tree`.
    ///
    /// Oracle availability is checked for all rules before any traversal
    /// starts. Rules run in parallel; diagnostics are ordered by registry
    /// order, then by traversal order within a rule.
    ///
    /// # Errors
    /// Returns [`LintError::OracleUnavailable`] if a semantic rule is selected
    /// and `types` is `None`
    pub fn lint(
        &self,
        tree: &TreeView,
        types: Option<&dyn TypeOracle>,
    ) -> Result<Vec<Diagnostic>, LintError> {
        for rule in &self.registry {
            rule.ensure_runnable(types)?;
        }
        if tree.malformed_count() > 0 {
            log::warn!(
                "tree has {} malformed node(s); rules will skip them",
                tree.malformed_count()
            );
        }

        // One memo per pass, shared by every rule
        let cached = types.map(CachedOracle::new);
        let types = cached.as_ref().map(|c| c as &dyn TypeOracle);

        let per_rule = self
            .registry
            .as_slice()
            .par_iter()
            .map(|rule| {
                let diagnostics = rule.apply(tree, types)?;
                log::debug!("{}: {} diagnostic(s)", rule.id(), diagnostics.len());
                Ok(diagnostics)
            })
            .collect::<Result<Vec<_>, LintError>>()?;
        Ok(per_rule.into_iter().flatten().collect())
    }

    /// Parse `source` and lint it.
    ///
    /// # Errors
    /// Returns error if parsing fails or a semantic rule has no oracle
    pub fn lint_source(
        &self,
        source: &str,
        dialect: Dialect,
        types: Option<&dyn TypeOracle>,
    ) -> Result<Vec<Diagnostic>, LintError> {
        let tree = SourceParser::new(dialect)?.parse(source)?;
        self.lint(&tree, types)
    }

    /// Lint `source` and apply every fix as one batch.
    ///
    /// A batch with conflicting replacements is rejected in full: `fixed` stays
    /// `None`, the error is recorded in `rejected` and the diagnostics are
    /// still returned.
    ///
    /// # Errors
    /// Returns error if parsing fails or a semantic rule has no oracle
    pub fn fix(
        &self,
        source: &str,
        dialect: Dialect,
        types: Option<&dyn TypeOracle>,
    ) -> Result<FixOutcome, LintError> {
        let diagnostics = self.lint_source(source, dialect, types)?;
        Ok(FixOutcome::apply(source, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rules::ids;
    use crate::test_utils::TextTypeOracle;
    use crate::types::{TypeFlags, TypeInfo};

    fn linter() -> Linter {
        Linter::new(RuleRegistry::all(&Config::default()))
    }

    fn syntactic_linter() -> Linter {
        let mut registry = RuleRegistry::all(&Config::default());
        registry.retain(|rule| !rule.requires_type_info());
        Linter::new(registry)
    }

    #[test]
    fn test_oracle_checked_before_traversal() {
        let err = linter()
            .lint_source("const x = 1;", Dialect::Tsx, None)
            .unwrap_err();
        assert_eq!(
            err,
            LintError::OracleUnavailable {
                rule: ids::RULE_ID_NIL_VALUE_PROPS
            }
        );
    }

    #[test]
    fn test_output_in_registry_order() {
        let source = "interface I { b: string; a: string; }\nfunction f() { return new Promise(() => {}); }\nthis.state.x = 1;";
        let diags = syntactic_linter()
            .lint_source(source, Dialect::TypeScript, None)
            .unwrap();
        let rules: Vec<_> = diags.iter().map(|d| d.rule_id).collect();
        assert_eq!(
            rules,
            vec![
                ids::RULE_ID_FAVOR_ASYNC,
                ids::RULE_ID_MUTATE_STATE,
                ids::RULE_ID_SORT_INTERFACES
            ]
        );
    }

    #[test]
    fn test_semantic_rules_see_oracle() {
        let oracle = TextTypeOracle::new().with(
            "v",
            TypeInfo::union([TypeFlags::STRING, TypeFlags::UNDEFINED]),
        );
        let diags = linter()
            .lint_source("const el = <input value={v} />;", Dialect::Tsx, Some(&oracle))
            .unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_id, ids::RULE_ID_NIL_VALUE_PROPS);
    }

    #[test]
    fn test_fix_applies_all_rules_at_once() {
        let source = "interface I { b: string; a: string; }\nconst el = <Foo z a />;\n";
        let outcome = syntactic_linter()
            .fix(source, Dialect::Tsx, None)
            .unwrap();
        assert!(outcome.rejected.is_none());
        assert!(outcome.is_changed());
        assert_eq!(
            outcome.output(),
            "interface I { a: string; b: string; }\nconst el = <Foo a z />;\n"
        );
        assert_eq!(outcome.diagnostics.len(), 2);
        assert_eq!(outcome.fixes_applied(), 2);
    }

    #[test]
    fn test_conflicting_batch_is_rejected_whole() {
        use crate::diagnostic::Replacement;
        use crate::span::Span;

        let source = "abcdef";
        let first = Diagnostic::new("a", Span::new(0, 3), "m")
            .with_replacements(vec![Replacement::new(Span::new(0, 3), "x")])
            .unwrap();
        let second = Diagnostic::new("b", Span::new(2, 5), "m")
            .with_replacements(vec![Replacement::new(Span::new(2, 5), "y")])
            .unwrap();
        let outcome = FixOutcome::apply(source, vec![first, second]);
        assert!(outcome.fixed.is_none());
        assert!(matches!(
            outcome.rejected,
            Some(LintError::OverlappingReplacements { .. })
        ));
        assert_eq!(outcome.fixes_applied(), 0);
        assert_eq!(outcome.output(), source);
        assert_eq!(outcome.diagnostics.len(), 2);
    }

    #[test]
    fn test_fix_without_fixable_diagnostics() {
        let source = "this.state.a = 1;";
        let outcome = syntactic_linter()
            .fix(source, Dialect::Tsx, None)
            .unwrap();
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.fixed.is_none());
        assert!(!outcome.is_changed());
        assert_eq!(outcome.output(), source);
    }

    #[test]
    fn test_lint_is_deterministic() {
        let source = "const el = <A d c b a {...x} />;\ninterface Q { z(): void; y: number; [k: string]: any; }";
        let linter = syntactic_linter();
        let first = linter.lint_source(source, Dialect::Tsx, None).unwrap();
        let second = linter.lint_source(source, Dialect::Tsx, None).unwrap();
        assert_eq!(first, second);
    }
}
