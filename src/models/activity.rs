//! Activity and sequence definitions.

use std::collections::BTreeMap;

/// Opaque activity name, possibly carrying a lifecycle suffix.
pub type ActivityLabel = String;

/// Zero-based index of an event within one sequence.
pub type Position = usize;

/// One distinct trace shape: an ordered list of activity labels.
///
/// Multiplicity and case-id bookkeeping live with the host; the core only
/// sees the deduplicated shapes.
pub type Sequence = Vec<ActivityLabel>;

/// Mapping from a node to the deduplicated list of its immediate successors,
/// accumulated over one or many sequences.
pub type SuccessorMap<N> = BTreeMap<N, Vec<N>>;

/// Partial map from a lifecycle start position to its matched complete
/// position within one sequence. Domain and range are disjoint; unmatched
/// trailing starts are absent.
pub type EquivalenceMap = BTreeMap<Position, Position>;
