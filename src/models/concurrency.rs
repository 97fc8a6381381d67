//! Concurrency relations over activity labels or trace positions.

use std::collections::BTreeSet;

/// Symmetric set of concurrent-pair facts.
///
/// Pairs are stored canonically as ordered tuples `(min, max)`, so `{a, b}`
/// and `{b, a}` are the same fact and re-adding an existing pair changes
/// nothing. A singleton `{a}` (stored as `(a, a)`) means `a` is concurrent
/// with itself, which arises when an activity overlaps another occurrence of
/// its own base name.
///
/// The node type is `String` for name-level relations and `usize` for
/// positional relations; the two are never mixed in one relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcurrencyRelation<N: Ord> {
    pairs: BTreeSet<(N, N)>,
}

impl<N: Ord> Default for ConcurrencyRelation<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Ord> ConcurrencyRelation<N> {
    /// Create an empty relation.
    pub fn new() -> Self {
        Self {
            pairs: BTreeSet::new(),
        }
    }

    /// Insert the unordered pair `{a, b}`. `a` may equal `b` (self-concurrency).
    ///
    /// Idempotent: re-adding an existing pair changes nothing.
    pub fn add_pair(&mut self, a: N, b: N) {
        if b < a {
            self.pairs.insert((b, a));
        } else {
            self.pairs.insert((a, b));
        }
    }

    /// Number of unordered pairs in the relation.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check whether the relation holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the canonical unordered pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(N, N)> {
        self.pairs.iter()
    }
}

impl<N: Ord + Clone> ConcurrencyRelation<N> {
    /// Check whether `{a, b}` is in the relation, in either orientation.
    pub fn contains(&self, a: &N, b: &N) -> bool {
        let key = if b < a {
            (b.clone(), a.clone())
        } else {
            (a.clone(), b.clone())
        };
        self.pairs.contains(&key)
    }

    /// Set union with another relation, returning a new relation.
    pub fn union(&self, other: &Self) -> Self {
        let mut pairs = self.pairs.clone();
        pairs.extend(other.pairs.iter().cloned());
        Self { pairs }
    }

    /// Enumerate all ordered realizations of the relation.
    ///
    /// `{a, b}` with `a != b` yields both `(a, b)` and `(b, a)`; a singleton
    /// `{a}` yields `(a, a)` exactly once. The iterator is lazy, finite, and
    /// restartable (call again for a fresh pass).
    pub fn realizations(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.pairs.iter().flat_map(|(a, b)| {
            let mut out = Vec::with_capacity(2);
            out.push((a.clone(), b.clone()));
            if a != b {
                out.push((b.clone(), a.clone()));
            }
            out
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realizations_yield_both_orders() {
        let mut rel = ConcurrencyRelation::new();
        rel.add_pair("A".to_string(), "B".to_string());

        let tuples: Vec<_> = rel.realizations().collect();
        assert_eq!(tuples.len(), 2);
        assert!(tuples.contains(&("A".to_string(), "B".to_string())));
        assert!(tuples.contains(&("B".to_string(), "A".to_string())));
    }

    #[test]
    fn test_self_concurrency_realized_once() {
        let mut rel = ConcurrencyRelation::new();
        rel.add_pair("A".to_string(), "A".to_string());

        let tuples: Vec<_> = rel.realizations().collect();
        assert_eq!(tuples, vec![("A".to_string(), "A".to_string())]);
    }

    #[test]
    fn test_add_pair_is_idempotent_and_symmetric() {
        let mut rel = ConcurrencyRelation::new();
        rel.add_pair(1, 2);
        rel.add_pair(2, 1);
        rel.add_pair(1, 2);

        assert_eq!(rel.len(), 1);
        assert!(rel.contains(&1, &2));
        assert!(rel.contains(&2, &1));
        assert_eq!(rel.realizations().count(), 2);
    }

    #[test]
    fn test_union_is_a_set_union() {
        let mut a = ConcurrencyRelation::new();
        a.add_pair(1, 2);
        let mut b = ConcurrencyRelation::new();
        b.add_pair(2, 1);
        b.add_pair(3, 4);

        let merged = a.union(&b);
        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&1, &2));
        assert!(merged.contains(&3, &4));
    }
}
