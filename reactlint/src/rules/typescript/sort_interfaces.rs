use crate::diagnostic::Diagnostic;
use crate::fix::sort::is_identity;
use crate::fix::{MultiKeySorter, Slot, SortKey};
use crate::rules::{ids, reorder_diagnostic};
use crate::rules::{RuleMetadata, SyntacticRule, CAT_MAINTAINABILITY};
use crate::tree::{NodeKind, NodeRef};

const META_SORT_INTERFACES: RuleMetadata = RuleMetadata {
    id: ids::RULE_ID_SORT_INTERFACES,
    description: "Make sure that TypeScript interfaces are sorted with index signatures first, then standard properties, then functions, with each group sorted alphabetically",
    category: CAT_MAINTAINABILITY,
    requires_type_info: false,
    produces_fix: true,
};

const BUCKET_INDEX: i64 = 0;
const BUCKET_DATA: i64 = 1;
const BUCKET_FUNCTION: i64 = 2;

fn message(name: &str) -> String {
    let name = if name.is_empty() { "<unknown>" } else { name };
    format!("TypeScript interface \"{name}\" must be sorted alphabetically")
}

/// Bucket and name of one interface member.
fn member_key(member: &NodeRef<'_>) -> SortKey {
    let name = |m: &NodeRef<'_>| {
        m.child_by_field("name")
            .map_or_else(|| m.text().to_owned(), |n| n.text().to_owned())
    };
    match member.kind() {
        NodeKind::IndexSignature => SortKey::new(BUCKET_INDEX, member.text()),
        NodeKind::MethodSignature => SortKey::new(BUCKET_FUNCTION, name(member)),
        NodeKind::PropertySignature => {
            let is_function = member
                .child_by_field("type")
                .and_then(|annotation| annotation.first_child())
                .is_some_and(|ty| ty.kind() == NodeKind::FunctionType);
            let bucket = if is_function {
                BUCKET_FUNCTION
            } else {
                BUCKET_DATA
            };
            SortKey::new(bucket, name(member))
        }
        // Call and construct signatures stay with the data members
        _ => SortKey::new(BUCKET_DATA, member.text()),
    }
}

pub(super) struct SortInterfacesRule;

impl SyntacticRule for SortInterfacesRule {
    fn name(&self) -> &'static str {
        "SortInterfacesRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_SORT_INTERFACES
    }
    fn check(&self, node: NodeRef<'_>) -> Option<Vec<Diagnostic>> {
        if node.kind() != NodeKind::InterfaceDeclaration {
            return None;
        }
        let name = node.child_by_field("name")?;
        let body = node.child_by_field("body")?;
        let members: Vec<NodeRef<'_>> = body.named_children().collect();
        if members.len() < 2 {
            return None;
        }

        let order = MultiKeySorter::new().sort_key(member_key).order(&members);
        if is_identity(&order) {
            return None;
        }

        // Members move together with their leading comments and whitespace
        let slots: Vec<Slot<'_>> = members
            .iter()
            .map(|m| Slot::new(m.full_span(), m.full_text()))
            .collect();
        Some(vec![reorder_diagnostic(
            META_SORT_INTERFACES.id,
            name.span(),
            message(name.text()),
            &slots,
            &order,
        )])
    }
}
