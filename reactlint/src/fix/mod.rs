//! Autofix machinery shared by the fix-producing rules.
//!
//! - [`sort`]: computes the target order of a sibling sequence
//! - [`synthesize`]: turns current vs. target order into replacements
//! - [`ByteRangeRewriter`]: applies a batch of replacements to source text
//!
//! Rules only ever propose replacements; applying them is the host's call.

mod rewriter;
pub mod sort;
pub mod synthesize;

pub use rewriter::{apply_fixes, ByteRangeRewriter};
pub use sort::{Direction, KeyPart, MultiKeySorter, SortKey};
pub use synthesize::{synthesize, Slot};
