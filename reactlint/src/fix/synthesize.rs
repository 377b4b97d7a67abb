//! Turn "current order vs. target order" into text replacements.

use crate::diagnostic::{normalize_replacements, Replacement};
use crate::error::LintError;
use crate::span::Span;

/// One positional slot of a node sequence: where the node sits and the text
/// that moves with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    /// Span the node currently occupies
    pub span: Span,
    /// Text carried by the node when it moves
    pub text: &'a str,
}

impl<'a> Slot<'a> {
    /// Create a slot.
    #[must_use]
    pub const fn new(span: Span, text: &'a str) -> Self {
        Self { span, text }
    }
}

/// Minimal replacements that rearrange `slots` into `order`.
///
/// Position `i` receives the text of `slots[order[i]]`. Positions that keep
/// their node, or receive identical text from another node, produce no
/// replacement. The result is sorted by start offset.
///
/// # Errors
/// Returns [`LintError::InvalidPermutation`] if `order` is not a permutation
/// of the slot indices, or [`LintError::OverlappingReplacements`] if two slots
/// intersect
pub fn synthesize(slots: &[Slot<'_>], order: &[usize]) -> Result<Vec<Replacement>, LintError> {
    let invalid = || LintError::InvalidPermutation {
        expected: slots.len(),
        got: order.len(),
    };
    if order.len() != slots.len() {
        return Err(invalid());
    }
    let mut seen = vec![false; slots.len()];
    for &index in order {
        match seen.get_mut(index) {
            Some(flag) if !*flag => *flag = true,
            _ => return Err(invalid()),
        }
    }

    let mut replacements: Vec<Replacement> = order
        .iter()
        .enumerate()
        .filter(|&(position, &source)| {
            position != source && slots[position].text != slots[source].text
        })
        .map(|(position, &source)| Replacement::new(slots[position].span, slots[source].text))
        .collect();
    normalize_replacements(&mut replacements)?;
    Ok(replacements)
}
