use crate::diagnostic::Diagnostic;
use crate::rules::ids;
use crate::rules::{RuleMetadata, SemanticRule, CAT_FUNCTIONALITY};
use crate::tree::{NodeKind, NodeRef};
use crate::types::{TypeFlags, TypeOracle};

const META_NIL_VALUE_PROPS: RuleMetadata = RuleMetadata {
    id: ids::RULE_ID_NIL_VALUE_PROPS,
    description: "Warn when undefined/null may be passed to a component's `value` prop",
    category: CAT_FUNCTIONALITY,
    requires_type_info: true,
    produces_fix: false,
};

const MESSAGE: &str = "React components should never be able to have undefined/null passed into a value prop or the component will become uncontrolled.";

const NIL: TypeFlags = TypeFlags(TypeFlags::UNDEFINED.0 | TypeFlags::NULL.0);

pub(super) struct NilValuePropsRule;

impl SemanticRule for NilValuePropsRule {
    fn name(&self) -> &'static str {
        "NilValuePropsRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_NIL_VALUE_PROPS
    }
    fn check(&self, node: NodeRef<'_>, types: &dyn TypeOracle) -> Option<Vec<Diagnostic>> {
        if node.kind() != NodeKind::JsxAttribute {
            return None;
        }
        let mut parts = node.named_children();
        if parts.next()?.text() != "value" {
            return None;
        }
        // String literal values cannot be nil
        let initializer = parts.next()?;
        if initializer.kind() != NodeKind::JsxExpression {
            return None;
        }
        let expression = initializer.first_child()?;
        let info = types.type_at(expression)?;

        // Only a bare union is expanded; a union carrying extra flags is
        // checked as a whole
        let candidates = if info.flags == TypeFlags::UNION {
            info.alternatives
        } else {
            vec![info.flags]
        };
        let findings: Vec<Diagnostic> = candidates
            .into_iter()
            .filter(|flags| flags.intersects(NIL))
            .map(|_| Diagnostic::new(META_NIL_VALUE_PROPS.id, expression.span(), MESSAGE))
            .collect();

        if findings.is_empty() {
            None
        } else {
            Some(findings)
        }
    }
}
