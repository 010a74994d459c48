//! Maximum flow and minimum cut (Edmonds-Karp).

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::graph::Graph;
use crate::types::{GraphError, GraphResult, NodeId};

/// Residual capacities at or below this are treated as saturated.
pub const FLOW_EPSILON: f64 = 1e-12;

/// A directed capacitated edge of a flow network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: f64,
}

/// A transient flow network derived from a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    nodes: Vec<NodeId>,
    edges: Vec<FlowEdge>,
    adjacency: HashMap<NodeId, Vec<usize>>,
}

impl FlowNetwork {
    /// Create a network over `nodes` with no edges.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
            adjacency: HashMap::new(),
        }
    }

    /// Convert a graph into a flow network.
    ///
    /// Capacity is the stored weight, or 1 when the graph is unweighted or
    /// the weight is exactly zero. Negative capacities are dropped with a
    /// warning. Each logical connection of a non-oriented graph becomes a
    /// forward and a reverse edge of equal capacity.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut network = Self::new(graph.nodes().to_vec());
        for edge in graph.connections() {
            let mut capacity = if graph.is_weighted() { edge.weight } else { 1.0 };
            if capacity == 0.0 {
                capacity = 1.0;
            }
            if capacity < 0.0 {
                log::warn!(
                    "Dropping edge {} ({} -> {}) with negative capacity {:.2}",
                    edge.id,
                    edge.from,
                    edge.to,
                    capacity
                );
                continue;
            }
            network.add_edge(edge.from, edge.to, capacity);
            if !graph.is_oriented() {
                network.add_edge(edge.to, edge.from, capacity);
            }
        }
        network
    }

    /// Append an edge, returns its index.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: f64) -> usize {
        let index = self.edges.len();
        self.edges.push(FlowEdge { from, to, capacity });
        self.adjacency.entry(from).or_default().push(index);
        index
    }

    /// Vertices of the network.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// All edges, by index.
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Indices of edges leaving `node`.
    pub fn outgoing(&self, node: NodeId) -> &[usize] {
        self.adjacency.get(&node).map_or(&[][..], Vec::as_slice)
    }

    /// Whether `node` is a vertex of the network.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}

/// Shorthand for [`FlowNetwork::from_graph`].
pub fn build_flow_network(graph: &Graph) -> FlowNetwork {
    FlowNetwork::from_graph(graph)
}

/// Result of a max-flow computation.
#[derive(Debug, Clone)]
pub struct MaxFlow {
    /// Total flow from source to sink.
    pub value: f64,
    /// Flow on each network edge, by edge index.
    pub flows: Vec<f64>,
    /// Network edges crossing from the source side to the sink side.
    pub min_cut: Vec<FlowEdge>,
    /// Vertices reachable from the source in the final residual graph.
    pub source_side: HashSet<NodeId>,
    /// Number of augmenting paths used.
    pub augmentations: usize,
}

impl MaxFlow {
    /// Flow on network edge `index`.
    pub fn flow_on(&self, index: usize) -> Option<f64> {
        self.flows.get(index).copied()
    }

    /// Total capacity of the min-cut edges. Equals [`MaxFlow::value`].
    pub fn min_cut_capacity(&self) -> f64 {
        self.min_cut.iter().map(|e| e.capacity).sum()
    }
}

/// A residual arc: a network edge or its paired back-arc.
#[derive(Debug, Clone, Copy)]
struct Arc {
    from: NodeId,
    to: NodeId,
    capacity: f64,
    flow: f64,
    rev: usize,
}

impl Arc {
    fn residual(&self) -> f64 {
        self.capacity - self.flow
    }
}

/// Edmonds-Karp: BFS augmenting paths over the residual graph.
///
/// O(V * E^2).
pub fn edmonds_karp(network: &FlowNetwork, source: NodeId, sink: NodeId) -> GraphResult<MaxFlow> {
    if !network.contains(source) {
        return Err(GraphError::InvalidEndpoint(source));
    }
    if !network.contains(sink) {
        return Err(GraphError::InvalidEndpoint(sink));
    }
    if source == sink {
        return Err(GraphError::DegenerateFlow(source));
    }

    // Arc 2i is network edge i, arc 2i+1 its back-arc.
    let mut arcs: Vec<Arc> = Vec::with_capacity(network.edges().len() * 2);
    let mut residual_adj: HashMap<NodeId, Vec<usize>> = HashMap::new();
    for edge in network.edges() {
        let forward = arcs.len();
        arcs.push(Arc {
            from: edge.from,
            to: edge.to,
            capacity: edge.capacity,
            flow: 0.0,
            rev: forward + 1,
        });
        arcs.push(Arc {
            from: edge.to,
            to: edge.from,
            capacity: 0.0,
            flow: 0.0,
            rev: forward,
        });
        residual_adj.entry(edge.from).or_default().push(forward);
        residual_adj.entry(edge.to).or_default().push(forward + 1);
    }

    let mut value = 0.0;
    let mut augmentations = 0;

    while let Some(parent) = augmenting_path(&arcs, &residual_adj, source, sink) {
        let mut bottleneck = f64::INFINITY;
        let mut node = sink;
        while node != source {
            let arc = &arcs[parent[&node]];
            bottleneck = bottleneck.min(arc.residual());
            node = arc.from;
        }

        let mut node = sink;
        while node != source {
            let a = parent[&node];
            arcs[a].flow += bottleneck;
            let rev = arcs[a].rev;
            arcs[rev].flow -= bottleneck;
            node = arcs[a].from;
        }

        value += bottleneck;
        augmentations += 1;
    }

    let source_side = residual_reachable(&arcs, &residual_adj, source);
    let flows: Vec<f64> = (0..network.edges().len()).map(|i| arcs[2 * i].flow).collect();
    let min_cut: Vec<FlowEdge> = network
        .edges()
        .iter()
        .filter(|e| source_side.contains(&e.from) && !source_side.contains(&e.to))
        .copied()
        .collect();

    log::debug!(
        "Edmonds-Karp {} -> {}: flow {} after {} augmentations",
        source,
        sink,
        value,
        augmentations
    );

    Ok(MaxFlow {
        value,
        flows,
        min_cut,
        source_side,
        augmentations,
    })
}

/// Shortest augmenting path as a map vertex -> arc used to enter it.
fn augmenting_path(
    arcs: &[Arc],
    adj: &HashMap<NodeId, Vec<usize>>,
    source: NodeId,
    sink: NodeId,
) -> Option<HashMap<NodeId, usize>> {
    let mut parent: HashMap<NodeId, usize> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::from([source]);
    let mut queue = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        if current == sink {
            return Some(parent);
        }
        for &a in adj.get(&current).map_or(&[][..], Vec::as_slice) {
            let arc = &arcs[a];
            if arc.residual() > FLOW_EPSILON && visited.insert(arc.to) {
                parent.insert(arc.to, a);
                queue.push_back(arc.to);
            }
        }
    }
    None
}

fn residual_reachable(
    arcs: &[Arc],
    adj: &HashMap<NodeId, Vec<usize>>,
    source: NodeId,
) -> HashSet<NodeId> {
    let mut visited: HashSet<NodeId> = HashSet::from([source]);
    let mut queue = VecDeque::from([source]);
    while let Some(current) = queue.pop_front() {
        for &a in adj.get(&current).map_or(&[][..], Vec::as_slice) {
            let arc = &arcs[a];
            if arc.residual() > FLOW_EPSILON && visited.insert(arc.to) {
                queue.push_back(arc.to);
            }
        }
    }
    visited
}
