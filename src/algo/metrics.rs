//! Structural metrics: cyclomatic number and knots.

use serde::Serialize;

use crate::graph::traversal::{connected_components, require_oriented};
use crate::graph::Graph;
use crate::types::{GraphResult, NodeId};

/// The inputs and value of the cyclomatic number `e - v + p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CyclomaticReport {
    /// Logical edge count (`e`).
    pub edges: usize,
    /// Vertex count (`v`).
    pub vertices: usize,
    /// Weakly connected component count (`p`).
    pub components: usize,
    /// `max(0, e - v + p)`.
    pub number: usize,
}

/// Compute the cyclomatic number together with its inputs.
pub fn cyclomatic_report(graph: &Graph) -> CyclomaticReport {
    let edges = graph.edge_count();
    let vertices = graph.vertex_count();
    let components = connected_components(graph);
    let number = (edges + components).saturating_sub(vertices);
    CyclomaticReport {
        edges,
        vertices,
        components,
        number,
    }
}

/// Cyclomatic number (cycle rank): minimum edges to remove for acyclicity.
pub fn cyclomatic_number(graph: &Graph) -> usize {
    cyclomatic_report(graph).number
}

/// Vertices carrying at least one self-loop, each listed once.
///
/// Only defined for oriented graphs.
pub fn knots(graph: &Graph) -> GraphResult<Vec<NodeId>> {
    require_oriented(graph, "knots")?;
    Ok(graph
        .nodes()
        .iter()
        .copied()
        .filter(|&id| graph.edges_from(id).iter().any(|e| e.is_self_loop()))
        .collect())
}
