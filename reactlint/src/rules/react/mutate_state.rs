use crate::diagnostic::Diagnostic;
use crate::rules::ids;
use crate::rules::{RuleMetadata, SyntacticRule, CAT_FUNCTIONALITY};
use crate::tree::{NodeKind, NodeRef};

const META_MUTATE_STATE: RuleMetadata = RuleMetadata {
    id: ids::RULE_ID_MUTATE_STATE,
    description: "Forbid direct mutation of component state",
    category: CAT_FUNCTIONALITY,
    requires_type_info: false,
    produces_fix: false,
};

const MESSAGE: &str = "Do not mutate state.";

pub(super) struct MutateStateRule;

impl SyntacticRule for MutateStateRule {
    fn name(&self) -> &'static str {
        "MutateStateRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_MUTATE_STATE
    }
    fn check(&self, node: NodeRef<'_>) -> Option<Vec<Diagnostic>> {
        // Plain `=` only; `+=` and friends are a different node kind
        if node.kind() != NodeKind::AssignmentExpression {
            return None;
        }
        let left = node.child_by_field("left")?;
        if left.kind() != NodeKind::MemberExpression
            || left.leftmost_leaf().kind() != NodeKind::ThisExpression
            || !left.text().contains(".state.")
        {
            return None;
        }
        Some(vec![Diagnostic::new(
            META_MUTATE_STATE.id,
            left.span(),
            MESSAGE,
        )])
    }
}
