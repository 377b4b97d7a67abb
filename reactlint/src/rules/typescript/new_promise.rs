use crate::diagnostic::Diagnostic;
use crate::rules::ids;
use crate::rules::{RuleMetadata, SyntacticRule, CAT_FUNCTIONALITY};
use crate::span::Span;
use crate::tree::{NodeKind, NodeRef};

const META_NEW_PROMISE: RuleMetadata = RuleMetadata {
    id: ids::RULE_ID_FAVOR_ASYNC,
    description: "Warn when a function returns a `new Promise` rather than using async/await",
    category: CAT_FUNCTIONALITY,
    requires_type_info: false,
    produces_fix: false,
};

const MESSAGE: &str = "Rather than making a new Promise, use the async/await paradigm instead. If you MUST make a new Promise, feel free to silence this warning.";

pub(super) struct NewPromiseRule {
    sentinel: String,
}

impl NewPromiseRule {
    pub fn new(sentinel: &str) -> Self {
        Self {
            sentinel: sentinel.to_owned(),
        }
    }
}

impl SyntacticRule for NewPromiseRule {
    fn name(&self) -> &'static str {
        "NewPromiseRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_NEW_PROMISE
    }
    fn check(&self, node: NodeRef<'_>) -> Option<Vec<Diagnostic>> {
        if node.kind() != NodeKind::NewExpression
            || node.parent()?.kind() != NodeKind::ReturnStatement
        {
            return None;
        }
        let constructor = node.child_by_field("constructor")?;
        if constructor.kind() != NodeKind::Identifier || constructor.text() != self.sentinel {
            return None;
        }
        // From the `new` keyword through the constructor name
        let span = Span::new(node.span().start, constructor.span().end);
        Some(vec![Diagnostic::new(META_NEW_PROMISE.id, span, MESSAGE)])
    }
}
