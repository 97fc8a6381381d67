//! Partial-order construction from total orders and concurrency relations.
//!
//! Both builders start from the plain total-order DAG of a sequence, take its
//! transitive closure, delete every closure edge a concurrency relation
//! declares unordered (in both directions, so no new reachability appears and
//! no cycle can form), and reduce the remainder to its covering relation.

use crate::models::{
    ActivityLabel, ConcurrencyRelation, EquivalenceMap, PartialOrderGraph, Position, SuccessorMap,
};

/// One sequence rewritten as a partial order.
#[derive(Debug, Clone)]
pub struct OrderedTrace {
    /// Position -> immediate-successor positions, for projection back onto
    /// the host's per-event records.
    pub successors: SuccessorMap<Position>,
    /// The covering relation as activity-label pairs, for reporting.
    pub edges: Vec<(ActivityLabel, ActivityLabel)>,
    /// The reduced graph itself, for isomorphism classification.
    pub graph: PartialOrderGraph,
}

impl OrderedTrace {
    fn from_graph(graph: PartialOrderGraph) -> Self {
        Self {
            successors: graph.successor_map(),
            edges: graph.labeled_edges(),
            graph,
        }
    }
}

/// Build a partial order using name-level concurrency.
///
/// Every closure edge between any position labeled `c1` and any position
/// labeled `c2` is deleted, for each realization `(c1, c2)` of the relation.
/// Positions left with no edges remain as isolated nodes.
pub fn build_by_name(
    sequence: &[ActivityLabel],
    relation: &ConcurrencyRelation<ActivityLabel>,
) -> OrderedTrace {
    let mut closure = PartialOrderGraph::total_order(sequence).transitive_closure();

    for (c1, c2) in relation.realizations() {
        let first = closure.positions_with_label(&c1);
        let second = closure.positions_with_label(&c2);
        for &a in &first {
            for &b in &second {
                closure.remove_edges_between(a, b);
            }
        }
    }

    OrderedTrace::from_graph(closure.transitive_reduction())
}

/// Build a partial order using positional concurrency and start/complete
/// equivalences.
///
/// The identical construction with position pairs taken directly from the
/// relation; afterwards every key of `equivalences` (a start position) is
/// removed from the graph, collapsing the start onto its completion.
pub fn build_by_position(
    sequence: &[ActivityLabel],
    relation: &ConcurrencyRelation<Position>,
    equivalences: &EquivalenceMap,
) -> OrderedTrace {
    let mut closure = PartialOrderGraph::total_order(sequence).transitive_closure();

    for (a, b) in relation.realizations() {
        closure.remove_edges_between(a, b);
    }
    for &start in equivalences.keys() {
        closure.remove_node(start);
    }

    OrderedTrace::from_graph(closure.transitive_reduction())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(names: &[&str]) -> Vec<ActivityLabel> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_relation_preserves_total_order() {
        let sequence = seq(&["A", "B", "C", "D"]);
        let ordered = build_by_name(&sequence, &ConcurrencyRelation::new());
        assert!(ordered
            .graph
            .is_isomorphic(&PartialOrderGraph::total_order(&sequence)));
    }

    #[test]
    fn test_concurrent_pair_becomes_unordered() {
        let mut relation = ConcurrencyRelation::new();
        relation.add_pair("B".to_string(), "C".to_string());

        let ordered = build_by_name(&seq(&["A", "B", "C"]), &relation);

        assert_eq!(ordered.successors[&0], vec![1, 2]);
        assert!(ordered.successors[&1].is_empty());
        assert!(ordered.successors[&2].is_empty());
        assert_eq!(ordered.edges.len(), 2);
        assert!(ordered.edges.contains(&("A".to_string(), "B".to_string())));
        assert!(ordered.edges.contains(&("A".to_string(), "C".to_string())));
    }

    #[test]
    fn test_name_relation_hits_every_occurrence() {
        let mut relation = ConcurrencyRelation::new();
        relation.add_pair("A".to_string(), "B".to_string());

        let ordered = build_by_name(&seq(&["A", "B", "A"]), &relation);

        // Both A positions are unordered w.r.t. B; only A's self-order stays.
        assert_eq!(ordered.successors[&0], vec![2]);
        assert!(ordered.successors[&1].is_empty());
    }

    #[test]
    fn test_build_by_position_collapses_starts() {
        let trace = seq(&["A+start", "B+start", "B+complete", "A+complete"]);
        let mut relation = ConcurrencyRelation::new();
        relation.add_pair(3, 1);
        relation.add_pair(3, 2);
        let equivalences: EquivalenceMap = [(0, 3), (1, 2)].into_iter().collect();

        let ordered = build_by_position(&trace, &relation, &equivalences);

        // Start nodes are gone; the two completions are mutually unordered.
        assert_eq!(ordered.graph.node_count(), 2);
        assert!(ordered.successors[&2].is_empty());
        assert!(ordered.successors[&3].is_empty());
        assert!(ordered.edges.is_empty());
    }

    #[test]
    fn test_build_by_position_keeps_sequential_part() {
        // C runs entirely after A's interval: A+start A+complete C+start C+complete.
        let trace = seq(&["A+start", "A+complete", "C+start", "C+complete"]);
        let equivalences: EquivalenceMap = [(0, 1), (2, 3)].into_iter().collect();

        let ordered = build_by_position(&trace, &ConcurrencyRelation::new(), &equivalences);

        assert_eq!(ordered.graph.node_count(), 2);
        assert_eq!(ordered.successors[&1], vec![3]);
        assert_eq!(
            ordered.edges,
            vec![("A+complete".to_string(), "C+complete".to_string())]
        );
    }
}
