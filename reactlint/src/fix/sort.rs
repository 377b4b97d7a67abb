//! Stable multi-key ordering of sibling nodes.
//!
//! Items are first partitioned by precedence predicates (the first matching
//! predicate wins, so earlier predicates take priority). Items inside a
//! precedence partition keep their original relative order. The remaining
//! items are ordered by the key list, and any remaining tie is broken by the
//! original position, so sorting an already sorted sequence is a no-op.

use std::cmp::Ordering;
use std::rc::Rc;

/// Sort direction of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// One component of a sort key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPart {
    /// Integer component
    Int(i64),
    /// Text component, stored lowercase so comparison is case-insensitive
    Text(String),
}

impl KeyPart {
    /// Case-insensitive text component.
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_lowercase())
    }
}

/// Coarse bucket plus text tie-break, the shape both sorting rules use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Lower buckets sort first
    pub bucket: i64,
    /// Compared case-insensitively inside a bucket
    pub text: String,
}

impl SortKey {
    /// Create a key.
    #[must_use]
    pub fn new(bucket: i64, text: impl Into<String>) -> Self {
        Self {
            bucket,
            text: text.into(),
        }
    }
}

type KeyFn<'a, T> = Box<dyn Fn(&T) -> KeyPart + 'a>;
type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// Computes the target order of a sequence.
pub struct MultiKeySorter<'a, T> {
    precedence: Vec<Predicate<'a, T>>,
    keys: Vec<(KeyFn<'a, T>, Direction)>,
}

impl<T> Default for MultiKeySorter<'_, T> {
    fn default() -> Self {
        Self {
            precedence: Vec::new(),
            keys: Vec::new(),
        }
    }
}

impl<'a, T> MultiKeySorter<'a, T> {
    /// A sorter with no keys; it leaves every sequence unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items matching `predicate` sort before every item matching no earlier
    /// predicate.
    #[must_use]
    pub fn precedence(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.precedence.push(Box::new(predicate));
        self
    }

    /// Append a key, compared after all previously added keys.
    #[must_use]
    pub fn key(mut self, key: impl Fn(&T) -> KeyPart + 'a, direction: Direction) -> Self {
        self.keys.push((Box::new(key), direction));
        self
    }

    /// Append ascending (bucket, case-insensitive text) keys.
    #[must_use]
    pub fn sort_key(self, key: impl Fn(&T) -> SortKey + 'a) -> Self {
        let key = Rc::new(key);
        let text_key = Rc::clone(&key);
        self.key(move |item| KeyPart::Int(key(item).bucket), Direction::Ascending)
            .key(
                move |item| KeyPart::text(&text_key(item).text),
                Direction::Ascending,
            )
    }

    /// Target order as a permutation: `order[i]` is the original index of
    /// the item that belongs at position `i`.
    #[must_use]
    pub fn order(&self, items: &[T]) -> Vec<usize> {
        let residue = self.precedence.len();
        let ranked: Vec<(usize, Vec<KeyPart>)> = items
            .iter()
            .map(|item| {
                let rank = self
                    .precedence
                    .iter()
                    .position(|p| p(item))
                    .unwrap_or(residue);
                let keys = if rank == residue {
                    self.keys.iter().map(|(k, _)| k(item)).collect()
                } else {
                    Vec::new()
                };
                (rank, keys)
            })
            .collect();

        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| {
            let (rank_a, keys_a) = &ranked[a];
            let (rank_b, keys_b) = &ranked[b];
            rank_a
                .cmp(rank_b)
                .then_with(|| self.compare_keys(keys_a, keys_b))
                .then(a.cmp(&b))
        });
        order
    }

    fn compare_keys(&self, a: &[KeyPart], b: &[KeyPart]) -> Ordering {
        for ((ka, kb), (_, direction)) in a.iter().zip(b).zip(&self.keys) {
            let ord = match direction {
                Direction::Ascending => ka.cmp(kb),
                Direction::Descending => kb.cmp(ka),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// Whether `order` is the identity permutation.
#[must_use]
pub fn is_identity(order: &[usize]) -> bool {
    order.iter().enumerate().all(|(i, &o)| i == o)
}
