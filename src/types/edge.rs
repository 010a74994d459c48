//! Edge identifiers and the stored edge record.

use serde::Serialize;

use super::NodeId;

/// Identifier of a stored edge record. Never reused within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeId(pub(crate) u64);

impl EdgeId {
    /// Raw numeric value of this ID.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A directed edge record, owned by the adjacency bucket of `from`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    /// Record identifier.
    pub id: EdgeId,
    /// Origin vertex.
    pub from: NodeId,
    /// Destination vertex.
    pub to: NodeId,
    /// Stored weight. Ignored by algorithms on unweighted graphs.
    pub weight: f64,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, from: NodeId, to: NodeId, weight: f64) -> Self {
        Self {
            id,
            from,
            to,
            weight,
        }
    }

    /// Whether this edge starts and ends at the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Whether `other` is the opposing record of the same connection.
    pub fn mirrors(&self, other: &Edge) -> bool {
        self.from == other.to && self.to == other.from && self.weight == other.weight
    }
}
