//! Minimum spanning tree (Prim).

use std::collections::{BinaryHeap, HashSet};

use crate::graph::Graph;
use crate::types::{Edge, GraphError, GraphResult, NodeId};

use super::queue::MinScored;

/// Result of a Prim run.
#[derive(Debug, Clone, Default)]
pub struct MstResult {
    /// Tree edges in the order they were chosen.
    pub edges: Vec<Edge>,
    /// Sum of effective weights of the tree edges.
    pub total_weight: f64,
    /// Whether the tree spans every vertex.
    pub is_connected: bool,
}

/// Prim's algorithm from `start` (or the first vertex).
///
/// Only defined for non-oriented graphs: oriented input returns an empty,
/// not-connected result. An empty graph is trivially connected.
pub fn prim(graph: &Graph, start: Option<NodeId>) -> GraphResult<MstResult> {
    if graph.is_oriented() {
        return Ok(MstResult::default());
    }
    let Some(start) = start.or_else(|| graph.node_at(0)) else {
        return Ok(MstResult {
            is_connected: true,
            ..MstResult::default()
        });
    };
    if !graph.contains(start) {
        return Err(GraphError::InvalidEndpoint(start));
    }

    let target_edges = graph.vertex_count() - 1;
    let mut result = MstResult::default();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut heap: BinaryHeap<MinScored<Edge>> = BinaryHeap::new();
    let mut seq = 0u64;

    let mut push_frontier = |heap: &mut BinaryHeap<MinScored<Edge>>,
                             visited: &HashSet<NodeId>,
                             node: NodeId| {
        for edge in graph.edges_from(node) {
            if !visited.contains(&edge.to) {
                heap.push(MinScored::new(graph.effective_weight(edge), seq, *edge));
                seq += 1;
            }
        }
    };

    visited.insert(start);
    push_frontier(&mut heap, &visited, start);

    while result.edges.len() < target_edges {
        let Some(MinScored {
            score, item: edge, ..
        }) = heap.pop()
        else {
            break;
        };
        if !visited.insert(edge.to) {
            continue;
        }
        result.edges.push(edge);
        result.total_weight += score;
        push_frontier(&mut heap, &visited, edge.to);
    }

    result.is_connected = visited.len() == graph.vertex_count();
    Ok(result)
}

/// Run [`prim`] from every vertex and keep the lightest spanning tree.
///
/// Ties keep the first result found. When no start yields a connected
/// tree, the run from the first vertex is returned.
pub fn prim_all_starts(graph: &Graph) -> GraphResult<MstResult> {
    if graph.is_empty() {
        return prim(graph, None);
    }

    let mut best: Option<MstResult> = None;
    for &start in graph.nodes() {
        let candidate = prim(graph, Some(start))?;
        if !candidate.is_connected {
            continue;
        }
        let better = best
            .as_ref()
            .map_or(true, |b| candidate.total_weight < b.total_weight);
        if better {
            best = Some(candidate);
        }
    }

    match best {
        Some(result) => Ok(result),
        None => prim(graph, None),
    }
}
