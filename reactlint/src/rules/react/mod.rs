//! Rules for React components written in JSX/TSX.

use crate::config::Config;
use crate::rules::Rule;
use crate::tree::{NodeKind, NodeRef};

mod mutate_state;
mod nil_value_props;
mod sort_attributes;

/// Returns every React rule.
#[must_use]
pub fn get_react_rules(_config: &Config) -> Vec<Rule> {
    vec![
        Rule::Semantic(Box::new(nil_value_props::NilValuePropsRule)),
        Rule::Syntactic(Box::new(mutate_state::MutateStateRule)),
        Rule::Syntactic(Box::new(sort_attributes::SortAttributesRule)),
    ]
}

/// Attributes of an opening or self-closing element, in source order.
///
/// Both plain `name="v"` attributes and `{...}` expressions (spreads and
/// comment placeholders) are included.
fn attributes<'t>(element: NodeRef<'t>) -> impl Iterator<Item = NodeRef<'t>> + 't {
    element
        .children()
        .filter(|c| matches!(c.kind(), NodeKind::JsxAttribute | NodeKind::JsxExpression))
}
