//! Label-annotated DAGs over trace positions.

use std::collections::{BTreeMap, BTreeSet};

use super::{ActivityLabel, Position, SuccessorMap};

/// A DAG over the positions of one sequence, node-labeled by activity.
///
/// Starts life as the plain total order of a sequence; concurrency-driven
/// edge removal and transitive reduction turn it into the covering relation
/// of the induced partial order. Node identity is the position; isolated
/// positions remain as nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialOrderGraph {
    labels: BTreeMap<Position, ActivityLabel>,
    edges: BTreeSet<(Position, Position)>,
}

/// Canonical shape summary used as an isomorphism pre-filter.
///
/// Two graphs with different signatures cannot be isomorphic; equal
/// signatures still require a full bijection search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSignature {
    node_count: usize,
    edge_count: usize,
    /// Sorted (label, in-degree, out-degree) profile over all nodes.
    profile: Vec<(ActivityLabel, usize, usize)>,
}

impl PartialOrderGraph {
    /// Build the total-order DAG of a sequence: node `i` labeled by the
    /// `i`-th activity, edges `i -> i + 1`.
    pub fn total_order(sequence: &[ActivityLabel]) -> Self {
        let labels = sequence
            .iter()
            .enumerate()
            .map(|(i, label)| (i, label.clone()))
            .collect();
        let edges = (1..sequence.len()).map(|i| (i - 1, i)).collect();
        Self { labels, edges }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over the nodes in ascending position order.
    pub fn nodes(&self) -> impl Iterator<Item = Position> + '_ {
        self.labels.keys().copied()
    }

    /// The activity label of a node, if present.
    pub fn label(&self, node: Position) -> Option<&str> {
        self.labels.get(&node).map(String::as_str)
    }

    /// Iterate over the edges in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.edges.iter().copied()
    }

    /// Check for a directed edge.
    pub fn has_edge(&self, from: Position, to: Position) -> bool {
        self.edges.contains(&(from, to))
    }

    /// Immediate successors of a node, in ascending order.
    pub fn successors(&self, node: Position) -> Vec<Position> {
        self.edges
            .range((node, Position::MIN)..=(node, Position::MAX))
            .map(|&(_, to)| to)
            .collect()
    }

    /// All positions carrying the given activity label, in ascending order.
    pub fn positions_with_label(&self, label: &str) -> Vec<Position> {
        self.labels
            .iter()
            .filter(|(_, l)| l.as_str() == label)
            .map(|(&p, _)| p)
            .collect()
    }

    /// Remove the edges `(a, b)` and `(b, a)` if present.
    pub fn remove_edges_between(&mut self, a: Position, b: Position) {
        self.edges.remove(&(a, b));
        self.edges.remove(&(b, a));
    }

    /// Remove a node together with all incident edges.
    pub fn remove_node(&mut self, node: Position) {
        self.labels.remove(&node);
        self.edges.retain(|&(from, to)| from != node && to != node);
    }

    /// Reachability closure: an edge `(u, v)` for every node `v` reachable
    /// from `u` over one or more edges. Requires an acyclic graph.
    pub fn transitive_closure(&self) -> Self {
        let mut closure = self.clone();
        for start in self.labels.keys().copied() {
            let mut stack = self.successors(start);
            let mut seen = BTreeSet::new();
            while let Some(node) = stack.pop() {
                if !seen.insert(node) {
                    continue;
                }
                closure.edges.insert((start, node));
                stack.extend(self.successors(node));
            }
        }
        closure
    }

    /// Transitive reduction: the minimal edge set with the same closure.
    ///
    /// An edge `(u, v)` is redundant when an alternate path of length >= 2
    /// from `u` to `v` exists, i.e. some other successor of `u` still
    /// reaches `v`. Unique for DAGs, so all redundant edges can be dropped
    /// in one pass.
    pub fn transitive_reduction(&self) -> Self {
        let closure = self.transitive_closure();
        let mut reduced = self.clone();
        reduced.edges.retain(|&(from, to)| {
            !self
                .successors(from)
                .iter()
                .any(|&mid| mid != to && closure.has_edge(mid, to))
        });
        reduced
    }

    /// Project the graph onto a node -> successor-list map.
    ///
    /// Every node appears as a key, sink nodes with an empty list.
    pub fn successor_map(&self) -> SuccessorMap<Position> {
        self.labels
            .keys()
            .map(|&node| (node, self.successors(node)))
            .collect()
    }

    /// The edge set as activity-label pairs, for reporting.
    pub fn labeled_edges(&self) -> Vec<(ActivityLabel, ActivityLabel)> {
        self.edges
            .iter()
            .map(|&(from, to)| (self.labels[&from].clone(), self.labels[&to].clone()))
            .collect()
    }

    /// Compute the canonical signature of this graph.
    pub fn signature(&self) -> GraphSignature {
        let keys = self.node_keys();
        let mut profile: Vec<_> = keys.into_values().collect();
        profile.sort();
        GraphSignature {
            node_count: self.labels.len(),
            edge_count: self.edges.len(),
            profile,
        }
    }

    /// Check isomorphism under a node bijection that preserves edge
    /// direction and node label; node identity itself is ignored.
    pub fn is_isomorphic(&self, other: &Self) -> bool {
        self.signature() == other.signature() && self.bijection_exists(other)
    }

    /// Per-node (label, in-degree, out-degree) keys.
    fn node_keys(&self) -> BTreeMap<Position, (ActivityLabel, usize, usize)> {
        let mut indeg: BTreeMap<Position, usize> = BTreeMap::new();
        let mut outdeg: BTreeMap<Position, usize> = BTreeMap::new();
        for &(from, to) in &self.edges {
            *outdeg.entry(from).or_insert(0) += 1;
            *indeg.entry(to).or_insert(0) += 1;
        }
        self.labels
            .iter()
            .map(|(&node, label)| {
                let key = (
                    label.clone(),
                    indeg.get(&node).copied().unwrap_or(0),
                    outdeg.get(&node).copied().unwrap_or(0),
                );
                (node, key)
            })
            .collect()
    }

    /// Backtracking search for a label- and direction-preserving bijection.
    ///
    /// Candidates are partitioned by (label, in-degree, out-degree) before
    /// the search; callers are expected to have compared signatures already.
    pub(crate) fn bijection_exists(&self, other: &Self) -> bool {
        let self_keys = self.node_keys();
        let other_keys = other.node_keys();
        let nodes: Vec<Position> = self.labels.keys().copied().collect();
        let mut mapping: Vec<(Position, Position)> = Vec::with_capacity(nodes.len());
        let mut used: BTreeSet<Position> = BTreeSet::new();
        self.extend_bijection(other, &self_keys, &other_keys, &nodes, &mut mapping, &mut used)
    }

    fn extend_bijection(
        &self,
        other: &Self,
        self_keys: &BTreeMap<Position, (ActivityLabel, usize, usize)>,
        other_keys: &BTreeMap<Position, (ActivityLabel, usize, usize)>,
        nodes: &[Position],
        mapping: &mut Vec<(Position, Position)>,
        used: &mut BTreeSet<Position>,
    ) -> bool {
        if mapping.len() == nodes.len() {
            return true;
        }
        let u = nodes[mapping.len()];
        let key = &self_keys[&u];
        for (&v, v_key) in other_keys {
            if v_key != key || used.contains(&v) {
                continue;
            }
            let consistent = mapping.iter().all(|&(a, b)| {
                self.has_edge(u, a) == other.has_edge(v, b)
                    && self.has_edge(a, u) == other.has_edge(b, v)
            });
            if !consistent {
                continue;
            }
            mapping.push((u, v));
            used.insert(v);
            if self.extend_bijection(other, self_keys, other_keys, nodes, mapping, used) {
                return true;
            }
            mapping.pop();
            used.remove(&v);
        }
        false
    }
}
