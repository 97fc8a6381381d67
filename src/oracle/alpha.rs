//! Alpha concurrency oracle.
//!
//! The classical alpha-relation rule: two activities that directly follow
//! each other in both orders somewhere in the log are concurrent.

use crate::models::{ActivityLabel, ConcurrencyRelation, SuccessorMap};

/// Derive name-level concurrency from bidirectional direct succession.
///
/// Records each adjacent pair of `sequence` as a deduplicated immediate
/// succession in `successors`, then emits `{k, s}` for every pair of
/// activities that succeed each other in both directions. Immediate
/// self-succession (`k == s`) is never treated as concurrency.
///
/// The accumulators move in by value and come back updated, so log-wide
/// callers can thread one pair of accumulators through every sequence while
/// trace-wise callers pass fresh ones. Accumulation is commutative: the
/// final relation depends only on the multiset of adjacent pairs, not the
/// order sequences are processed in.
pub fn find_alpha_concurrency(
    sequence: &[ActivityLabel],
    mut successors: SuccessorMap<ActivityLabel>,
    mut relation: ConcurrencyRelation<ActivityLabel>,
) -> (SuccessorMap<ActivityLabel>, ConcurrencyRelation<ActivityLabel>) {
    for window in sequence.windows(2) {
        let entry = successors.entry(window[0].clone()).or_default();
        if !entry.contains(&window[1]) {
            entry.push(window[1].clone());
        }
    }

    for (k, successors_of_k) in &successors {
        for s in successors_of_k {
            if k == s {
                continue;
            }
            if let Some(successors_of_s) = successors.get(s) {
                if successors_of_s.contains(k) {
                    relation.add_pair(k.clone(), s.clone());
                }
            }
        }
    }

    (successors, relation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(names: &[&str]) -> Vec<ActivityLabel> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn fresh() -> (SuccessorMap<ActivityLabel>, ConcurrencyRelation<ActivityLabel>) {
        (SuccessorMap::new(), ConcurrencyRelation::new())
    }

    #[test]
    fn test_mutual_succession_is_concurrent() {
        let (s, r) = fresh();
        let (_, relation) = find_alpha_concurrency(&seq(&["A", "B", "A", "B"]), s, r);
        assert!(relation.contains(&"A".to_string(), &"B".to_string()));
        assert_eq!(relation.len(), 1);
    }

    #[test]
    fn test_one_way_succession_is_not_concurrent() {
        let (s, r) = fresh();
        let (successors, relation) = find_alpha_concurrency(&seq(&["A", "B", "C"]), s, r);
        assert!(relation.is_empty());
        assert_eq!(successors[&"A".to_string()], vec!["B".to_string()]);
        assert_eq!(successors[&"B".to_string()], vec!["C".to_string()]);
    }

    #[test]
    fn test_self_succession_is_not_concurrent() {
        let (s, r) = fresh();
        let (_, relation) = find_alpha_concurrency(&seq(&["A", "A", "B"]), s, r);
        assert!(relation.is_empty());
    }

    #[test]
    fn test_accumulation_is_commutative_across_sequences() {
        let one = seq(&["A", "B"]);
        let two = seq(&["B", "A"]);

        let (s, r) = fresh();
        let (s, r) = find_alpha_concurrency(&one, s, r);
        let (_, forward) = find_alpha_concurrency(&two, s, r);

        let (s, r) = fresh();
        let (s, r) = find_alpha_concurrency(&two, s, r);
        let (_, backward) = find_alpha_concurrency(&one, s, r);

        assert_eq!(forward, backward);
        assert!(forward.contains(&"A".to_string(), &"B".to_string()));
    }
}
