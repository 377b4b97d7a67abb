//! Tests for the fix subsystem: ordering, replacement synthesis and rewriting.

#![allow(clippy::unwrap_used)]

use reactlint::fix::{
    apply_fixes, synthesize, ByteRangeRewriter, Direction, KeyPart, MultiKeySorter, Slot, SortKey,
};
use reactlint::{Diagnostic, LintError, Replacement, Span};

/// Comma separated words as slots, for rearranging.
fn word_slots(source: &str) -> Vec<Slot<'_>> {
    let mut slots = Vec::new();
    let mut start = 0;
    for word in source.split(", ") {
        slots.push(Slot::new(Span::new(start, start + word.len()), word));
        start += word.len() + 2;
    }
    slots
}

#[test]
fn test_sorter_is_stable_for_equal_keys() {
    let items = ["b1", "a1", "b2", "a2"];
    let order = MultiKeySorter::new()
        .key(|s: &&str| KeyPart::text(&s[..1]), Direction::Ascending)
        .order(&items);
    assert_eq!(order, vec![1, 3, 0, 2]);
}

#[test]
fn test_sorter_descending_key() {
    let items = [3_i64, 10, 7];
    let order = MultiKeySorter::new()
        .key(|n: &i64| KeyPart::Int(*n), Direction::Descending)
        .order(&items);
    assert_eq!(order, vec![1, 2, 0]);
}

#[test]
fn test_precedence_partitions_keep_source_order() {
    let items = ["z", "{...b}", "a", "{...a}"];
    let order = MultiKeySorter::new()
        .precedence(|s: &&str| s.starts_with("{..."))
        .key(|s: &&str| KeyPart::text(s), Direction::Ascending)
        .order(&items);
    // spreads are not sorted among themselves
    assert_eq!(order, vec![1, 3, 2, 0]);
}

#[test]
fn test_sorting_sorted_order_is_identity() {
    let items = ["[k]", "alpha", "Beta", "gamma()"];
    let sorter = MultiKeySorter::new().sort_key(|s: &&str| {
        let bucket = if s.starts_with('[') {
            0
        } else if s.ends_with(')') {
            2
        } else {
            1
        };
        SortKey::new(bucket, *s)
    });
    assert_eq!(sorter.order(&items), vec![0, 1, 2, 3]);
}

#[test]
fn test_synthesize_applies_target_order() {
    let source = "pear, fig, apple";
    let slots = word_slots(source);
    let replacements = synthesize(&slots, &[2, 1, 0]).unwrap();
    // `fig` stays where it is
    assert_eq!(replacements.len(), 2);

    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_replacements(replacements);
    assert_eq!(rewriter.apply().unwrap(), "apple, fig, pear");
}

#[test]
fn test_synthesize_identity_is_empty() {
    let slots = word_slots("a, b, c");
    assert!(synthesize(&slots, &[0, 1, 2]).unwrap().is_empty());
}

#[test]
fn test_synthesize_rejects_non_permutations() {
    let slots = word_slots("a, b, c");
    for order in [vec![0, 1], vec![0, 0, 1], vec![0, 1, 3]] {
        assert!(matches!(
            synthesize(&slots, &order),
            Err(LintError::InvalidPermutation { expected: 3, .. })
        ));
    }
}

#[test]
fn test_rewriter_rejects_split_character() {
    let source = "é";
    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_replacement(Replacement::new(Span::new(0, 1), "e"));
    assert!(matches!(
        rewriter.apply(),
        Err(LintError::ReplacementOutOfBounds { .. })
    ));
}

#[test]
fn test_rewriter_rejects_out_of_range() {
    let mut rewriter = ByteRangeRewriter::new("short");
    rewriter.add_replacement(Replacement::new(Span::new(0, 100), "long"));
    assert!(matches!(
        rewriter.apply(),
        Err(LintError::ReplacementOutOfBounds { source_len: 5, .. })
    ));
}

#[test]
fn test_rewriter_insertion_and_deletion() {
    let mut rewriter = ByteRangeRewriter::new("hello world");
    rewriter.add_replacement(Replacement::new(Span::empty_at(5), ","));
    rewriter.add_replacement(Replacement::new(Span::new(6, 11), ""));
    assert_eq!(rewriter.apply().unwrap(), "hello, ");
}

#[test]
fn test_apply_fixes_is_all_or_nothing() {
    let source = "abcdef";
    let first = Diagnostic::new("one", Span::new(0, 2), "m")
        .with_replacements(vec![Replacement::new(Span::new(0, 2), "AB")])
        .unwrap();
    let clashing = Diagnostic::new("two", Span::new(1, 4), "m")
        .with_replacements(vec![Replacement::new(Span::new(1, 4), "X")])
        .unwrap();
    let separate = Diagnostic::new("three", Span::new(4, 6), "m")
        .with_replacements(vec![Replacement::new(Span::new(4, 6), "EF")])
        .unwrap();

    assert_eq!(
        apply_fixes(source, &[first.clone(), separate.clone()]).unwrap(),
        "ABcdEF"
    );
    let err = apply_fixes(source, &[first, clashing, separate]).unwrap_err();
    assert_eq!(
        err,
        LintError::OverlappingReplacements {
            first: Span::new(0, 2),
            second: Span::new(1, 4)
        }
    );
}

#[test]
fn test_apply_fixes_ignores_diagnostics_without_fixes() {
    let plain = Diagnostic::new("plain", Span::new(0, 6), "m");
    assert_eq!(apply_fixes("abcdef", &[plain]).unwrap(), "abcdef");
}
