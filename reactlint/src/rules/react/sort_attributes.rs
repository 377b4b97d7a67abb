use super::attributes;
use crate::diagnostic::Diagnostic;
use crate::fix::sort::is_identity;
use crate::fix::{Direction, KeyPart, MultiKeySorter, Slot};
use crate::rules::{ids, reorder_diagnostic};
use crate::rules::{RuleMetadata, SyntacticRule, CAT_STYLE};
use crate::tree::NodeRef;

const META_SORT_ATTRIBUTES: RuleMetadata = RuleMetadata {
    id: ids::RULE_ID_SORT_JSX_ATTRIBUTES,
    description: "Make sure that JSX elements have their attributes sorted alphabetically",
    category: CAT_STYLE,
    requires_type_info: false,
    produces_fix: true,
};

const MESSAGE: &str = "JSX Elements must be sorted alphabetically.";

fn is_spread(attribute: &NodeRef<'_>) -> bool {
    attribute.text().starts_with("{...")
}

fn is_comment(attribute: &NodeRef<'_>) -> bool {
    attribute.text().starts_with("{/*")
}

/// Reports JSX elements whose attributes are not in alphabetical order.
///
/// Spreads move to the front and comment placeholders follow them. Neither
/// group is alphabetised: a later spread overrides an earlier one, so
/// `<A {...b} {...a} z />` is left as written. Alphabetising spreads as well
/// would change which props win.
pub(super) struct SortAttributesRule;

impl SyntacticRule for SortAttributesRule {
    fn name(&self) -> &'static str {
        "SortAttributesRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_SORT_ATTRIBUTES
    }
    fn check(&self, node: NodeRef<'_>) -> Option<Vec<Diagnostic>> {
        if !node.kind().is_jsx_opening_like() {
            return None;
        }
        // Fragments have no tag to anchor on
        let tag = node.child_by_field("name")?;
        let attrs: Vec<NodeRef<'_>> = attributes(node).collect();
        if attrs.len() < 2 {
            return None;
        }

        // Spreads first, then comment placeholders, then the rest by text
        let order = MultiKeySorter::new()
            .precedence(is_spread)
            .precedence(is_comment)
            .key(|a: &NodeRef<'_>| KeyPart::text(a.text()), Direction::Ascending)
            .order(&attrs);
        if is_identity(&order) {
            return None;
        }

        let slots: Vec<Slot<'_>> = attrs.iter().map(|a| Slot::new(a.span(), a.text())).collect();
        Some(vec![reorder_diagnostic(
            META_SORT_ATTRIBUTES.id,
            tag.span(),
            MESSAGE,
            &slots,
            &order,
        )])
    }
}
