//! Isomorphism-based deduplication of partial-order shapes.

use crate::models::{GraphSignature, PartialOrderGraph};

/// Identifier of one partial-order isomorphism class, assigned in
/// first-seen order starting at 1.
pub type ShapeId = u32;

#[derive(Debug, Clone)]
struct CatalogEntry {
    id: ShapeId,
    signature: GraphSignature,
    graph: PartialOrderGraph,
}

/// Insertion-ordered catalog of distinct partial-order shapes.
///
/// [`classify`](Self::classify) scans the catalog in insertion order and
/// returns the id of the first entry isomorphic to the probe under a node
/// bijection preserving edge direction and activity label; node identity is
/// ignored. Unknown shapes are appended with the next id. Since the catalog
/// is kept isomorph-free, at most one entry can match; the earliest-inserted
/// shape wins by construction. Each call costs up to one signature
/// comparison per entry plus a bijection search per signature hit, so the
/// catalog size is the dominant cost driver at scale — a host wanting
/// bounded latency must cap the catalog as its own policy.
#[derive(Debug, Clone, Default)]
pub struct PartialOrderCatalog {
    entries: Vec<CatalogEntry>,
}

impl PartialOrderCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct shapes seen so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no shape has been classified yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the id of `graph`'s isomorphism class, cataloging the shape
    /// first if it has not been seen.
    pub fn classify(&mut self, graph: PartialOrderGraph) -> ShapeId {
        let signature = graph.signature();

        for entry in &self.entries {
            if entry.signature == signature && entry.graph.bijection_exists(&graph) {
                return entry.id;
            }
        }

        let id = self.entries.len() as ShapeId + 1;
        log::debug!(
            "new partial-order shape {id} ({} nodes, {} edges)",
            graph.node_count(),
            graph.edge_count()
        );
        self.entries.push(CatalogEntry {
            id,
            signature,
            graph,
        });
        id
    }
}
