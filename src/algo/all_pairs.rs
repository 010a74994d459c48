//! All-pairs shortest paths (Floyd-Warshall).
//!
//! O(V^3) time and O(V^2) space: this is the scalability ceiling of the
//! engine, there is no sparse variant.

use std::collections::HashMap;

use crate::graph::Graph;
use crate::types::NodeId;

/// Dense distance matrix indexed by vertex display order at computation time.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    dist: Vec<Vec<f64>>,
    has_negative_cycle: bool,
}

impl DistanceMatrix {
    /// Vertices in row/column order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Shortest distance from `u` to `v`; `+inf` when unreachable, `None`
    /// when either handle was not part of the graph.
    pub fn get(&self, u: NodeId, v: NodeId) -> Option<f64> {
        let i = *self.index.get(&u)?;
        let j = *self.index.get(&v)?;
        Some(self.dist[i][j])
    }

    /// Row of distances from `u`, in [`DistanceMatrix::nodes`] order.
    pub fn row(&self, u: NodeId) -> Option<&[f64]> {
        self.index.get(&u).map(|&i| self.dist[i].as_slice())
    }

    /// Whether any vertex lies on a negative cycle.
    pub fn has_negative_cycle(&self) -> bool {
        self.has_negative_cycle
    }
}

/// Floyd-Warshall over every vertex pair.
///
/// Parallel edges keep their minimum weight; unweighted graphs use unit
/// weights. A negative diagonal entry after relaxation flags a negative
/// cycle.
pub fn floyd_warshall(graph: &Graph) -> DistanceMatrix {
    let nodes: Vec<NodeId> = graph.nodes().to_vec();
    let n = nodes.len();
    let index: HashMap<NodeId, usize> = nodes.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    let mut dist = vec![vec![f64::INFINITY; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
    }

    for edge in graph.edges() {
        let (Some(&i), Some(&j)) = (index.get(&edge.from), index.get(&edge.to)) else {
            continue;
        };
        let weight = graph.effective_weight(&edge);
        if weight < dist[i][j] {
            dist[i][j] = weight;
        }
    }

    for k in 0..n {
        for i in 0..n {
            let dik = dist[i][k];
            if dik == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let dkj = dist[k][j];
                if dkj == f64::INFINITY {
                    continue;
                }
                if dik + dkj < dist[i][j] {
                    dist[i][j] = dik + dkj;
                }
            }
        }
    }

    let has_negative_cycle = (0..n).any(|i| dist[i][i] < 0.0);
    log::debug!(
        "Floyd-Warshall over {} vertices (negative cycle: {})",
        n,
        has_negative_cycle
    );

    DistanceMatrix {
        nodes,
        index,
        dist,
        has_negative_cycle,
    }
}
