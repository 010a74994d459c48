//! Core graph structure: a vertex arena plus per-vertex adjacency buckets.

use std::collections::HashMap;

use crate::types::{
    Edge, EdgeId, GraphError, GraphResult, NodeId, Value, UNIT_WEIGHT, UNWEIGHTED_EDGE_WEIGHT,
};

/// A live vertex: its value and the ordered edges leaving it.
#[derive(Debug, Clone)]
struct NodeEntry {
    value: Value,
    out: Vec<Edge>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entry: Option<NodeEntry>,
}

/// The mutable graph model shared by every algorithm in this crate.
///
/// Edges are always stored directed, in the bucket of their `from` vertex.
/// A non-oriented graph stores each logical connection as two opposing
/// records with equal weight.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Vertex arena, addressed by `NodeId::index`.
    slots: Vec<Slot>,
    /// Vacant slot indices available for reuse.
    free: Vec<u32>,
    /// Live vertices in insertion order; position = display index.
    order: Vec<NodeId>,
    /// Next edge record ID.
    next_edge_id: u64,
    oriented: bool,
    weighted: bool,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new(oriented: bool, weighted: bool) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            next_edge_id: 0,
            oriented,
            weighted,
        }
    }

    /// Whether edge direction is meaningful.
    pub fn is_oriented(&self) -> bool {
        self.oriented
    }

    /// Whether stored weights are meaningful.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Flip the graph-level flags.
    ///
    /// Stored edges are left untouched: turning an oriented graph into a
    /// non-oriented one does not create mirror records.
    pub fn retype(&mut self, oriented: bool, weighted: bool) {
        if oriented != self.oriented {
            log::debug!(
                "Retyping graph to {} without repairing {} stored edges",
                if oriented { "oriented" } else { "non-oriented" },
                self.stored_edge_count()
            );
        }
        self.oriented = oriented;
        self.weighted = weighted;
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Number of stored edge records.
    pub fn stored_edge_count(&self) -> usize {
        self.entries().map(|e| e.out.len()).sum()
    }

    /// Number of logical edges: stored records, halved for non-oriented graphs.
    pub fn edge_count(&self) -> usize {
        let stored = self.stored_edge_count();
        if self.oriented {
            stored
        } else {
            stored / 2
        }
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` is a live vertex of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    /// Get a vertex value (immutable).
    pub fn value(&self, id: NodeId) -> Option<&Value> {
        self.entry(id).map(|e| &e.value)
    }

    /// Get a vertex value (mutable).
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut Value> {
        self.entry_mut(id).map(|e| &mut e.value)
    }

    /// All vertices in display order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.order
    }

    /// Resolve a display index to a handle.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.order.get(index).copied()
    }

    /// Display index of a vertex. Linear in the vertex count.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.order.iter().position(|&n| n == id)
    }

    /// Get all edges leaving a vertex. Empty for unknown handles.
    pub fn edges_from(&self, id: NodeId) -> &[Edge] {
        match self.entry(id) {
            Some(entry) => &entry.out,
            None => &[],
        }
    }

    /// Snapshot of every stored record, bucket by bucket in display order.
    ///
    /// Positions in this listing are what a front-end shows as edge
    /// indices; pass the chosen record's `id` back to [`Graph::remove_edge`].
    pub fn edges(&self) -> Vec<Edge> {
        self.order
            .iter()
            .flat_map(|&id| self.edges_from(id).iter().copied())
            .collect()
    }

    /// One record per logical connection.
    ///
    /// Oriented graphs return every stored record. Non-oriented graphs skip
    /// the second record of each mirrored pair.
    pub fn connections(&self) -> Vec<Edge> {
        if self.oriented {
            return self.edges();
        }
        let mut pending: HashMap<(NodeId, NodeId, u64), usize> = HashMap::new();
        let mut result = Vec::new();
        for edge in self.edges() {
            let mirror_key = (edge.to, edge.from, edge.weight.to_bits());
            if let Some(count) = pending.get_mut(&mirror_key) {
                if *count > 0 {
                    *count -= 1;
                    continue;
                }
            }
            *pending
                .entry((edge.from, edge.to, edge.weight.to_bits()))
                .or_insert(0) += 1;
            result.push(edge);
        }
        result
    }

    /// Find the first vertex (in display order) holding `value`.
    pub fn find_vertex(&self, value: &Value) -> Option<NodeId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.value(id) == Some(value))
    }

    /// Resolve a value to a vertex, creating it when absent.
    pub fn vertex_or_insert(&mut self, value: Value) -> NodeId {
        match self.find_vertex(&value) {
            Some(id) => id,
            None => self.add_vertex(value),
        }
    }

    /// Add a vertex, returns its handle.
    pub fn add_vertex(&mut self, value: Value) -> NodeId {
        let entry = NodeEntry {
            value,
            out: Vec::new(),
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(entry);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                NodeId::new(index, 0)
            }
        };
        self.order.push(id);
        id
    }

    /// Add an edge between two existing vertices.
    ///
    /// Non-oriented graphs also get the mirror record; the returned ID is
    /// the forward record. Non-oriented unweighted graphs store
    /// [`UNWEIGHTED_EDGE_WEIGHT`] regardless of `weight`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> GraphResult<EdgeId> {
        if !self.contains(from) {
            return Err(GraphError::InvalidEndpoint(from));
        }
        if !self.contains(to) {
            return Err(GraphError::InvalidEndpoint(to));
        }

        let weight = if !self.oriented && !self.weighted {
            UNWEIGHTED_EDGE_WEIGHT
        } else {
            weight
        };

        let id = self.push_record(from, to, weight);
        if !self.oriented {
            self.push_record(to, from, weight);
        }
        Ok(id)
    }

    /// Remove a vertex and every edge touching it. No-op for unknown handles.
    pub fn remove_vertex(&mut self, id: NodeId) -> Option<Value> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let removed = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.order.retain(|&n| n != id);

        // Inbound edges are only indexed by their source, so scan every bucket.
        let mut inbound = 0usize;
        for slot in &mut self.slots {
            if let Some(entry) = slot.entry.as_mut() {
                let before = entry.out.len();
                entry.out.retain(|e| e.to != id);
                inbound += before - entry.out.len();
            }
        }
        log::debug!(
            "Removed vertex {} with {} outgoing and {} incoming edges",
            id,
            removed.out.len(),
            inbound
        );

        Some(removed.value)
    }

    /// Remove exactly one stored record. The mirror of a non-oriented
    /// connection is left in place.
    pub fn remove_edge_record(&mut self, edge_id: EdgeId) -> GraphResult<Edge> {
        for slot in &mut self.slots {
            if let Some(entry) = slot.entry.as_mut() {
                if let Some(pos) = entry.out.iter().position(|e| e.id == edge_id) {
                    return Ok(entry.out.remove(pos));
                }
            }
        }
        Err(GraphError::EdgeNotFound(edge_id))
    }

    /// Remove a logical connection.
    ///
    /// On non-oriented graphs one mirror record (opposite direction, equal
    /// weight) is removed along with the given record, keeping the
    /// two-record invariant intact. Returns every removed record.
    pub fn remove_edge(&mut self, edge_id: EdgeId) -> GraphResult<Vec<Edge>> {
        let edge = self.remove_edge_record(edge_id)?;
        let mut removed = vec![edge];
        if !self.oriented {
            let mirror = self
                .edges_from(edge.to)
                .iter()
                .find(|e| e.mirrors(&edge))
                .map(|e| e.id);
            if let Some(mirror_id) = mirror {
                removed.push(self.remove_edge_record(mirror_id)?);
            }
        }
        Ok(removed)
    }

    /// Number of stored records whose `to` is `id`.
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.entries()
            .flat_map(|entry| entry.out.iter())
            .filter(|e| e.to == id)
            .count()
    }

    /// In-degree of every vertex, zero included.
    pub fn in_degrees(&self) -> HashMap<NodeId, usize> {
        let mut degrees: HashMap<NodeId, usize> = self.order.iter().map(|&id| (id, 0)).collect();
        for edge in self.entries().flat_map(|entry| entry.out.iter()) {
            *degrees.entry(edge.to).or_insert(0) += 1;
        }
        degrees
    }

    /// The weight algorithms should use for `edge`: the stored weight on
    /// weighted graphs, [`UNIT_WEIGHT`] otherwise.
    pub fn effective_weight(&self, edge: &Edge) -> f64 {
        if self.weighted {
            edge.weight
        } else {
            UNIT_WEIGHT
        }
    }

    fn push_record(&mut self, from: NodeId, to: NodeId, weight: f64) -> EdgeId {
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        if let Some(entry) = self.entry_mut(from) {
            entry.out.push(Edge::new(id, from, to, weight));
        }
        id
    }

    fn entry(&self, id: NodeId) -> Option<&NodeEntry> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut NodeEntry> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    fn entries(&self) -> impl Iterator<Item = &NodeEntry> {
        self.slots.iter().filter_map(|s| s.entry.as_ref())
    }
}

impl Default for Graph {
    /// A directed, unweighted graph.
    fn default() -> Self {
        Self::new(true, false)
    }
}
