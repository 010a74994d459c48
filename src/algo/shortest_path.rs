//! Single-source shortest paths: Dijkstra and Bellman-Ford.

use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use crate::graph::Graph;
use crate::types::{GraphError, GraphResult, NodeId};

use super::queue::MinScored;

/// Distances and predecessor links from one start vertex.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    start: NodeId,
    distances: HashMap<NodeId, f64>,
    predecessors: HashMap<NodeId, NodeId>,
}

impl ShortestPaths {
    /// The start vertex.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Distance to `node`, or `None` when it was not reached.
    pub fn distance(&self, node: NodeId) -> Option<f64> {
        self.distances.get(&node).copied()
    }

    /// Every reached vertex and its distance.
    pub fn distances(&self) -> &HashMap<NodeId, f64> {
        &self.distances
    }

    /// Vertices on the shortest path from the start to `target`, both ends
    /// included. `None` when `target` was not reached.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.distances.contains_key(&target) {
            return None;
        }
        walk_predecessors(&self.predecessors, self.start, target, self.distances.len())
    }
}

/// Dijkstra from `start` over non-negative weights.
///
/// Unweighted graphs use unit weights. A negative weight on any explored
/// edge fails with [`GraphError::NegativeWeight`].
pub fn dijkstra(graph: &Graph, start: NodeId) -> GraphResult<ShortestPaths> {
    dijkstra_bounded(graph, start, None)
}

/// Dijkstra that stops relaxing once tentative distances exceed `limit`.
///
/// Vertices farther than `limit` are absent from the result.
pub fn dijkstra_bounded(
    graph: &Graph,
    start: NodeId,
    limit: Option<f64>,
) -> GraphResult<ShortestPaths> {
    if !graph.contains(start) {
        return Err(GraphError::InvalidEndpoint(start));
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeId, NodeId> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    distances.insert(start, 0.0);
    heap.push(MinScored::new(0.0, seq, start));

    while let Some(MinScored {
        score: dist,
        item: current,
        ..
    }) = heap.pop()
    {
        if !settled.insert(current) {
            continue;
        }
        for edge in graph.edges_from(current) {
            let weight = graph.effective_weight(edge);
            if weight < 0.0 {
                return Err(GraphError::NegativeWeight {
                    edge: edge.id,
                    weight,
                });
            }
            let candidate = dist + weight;
            if limit.is_some_and(|max| candidate > max) {
                continue;
            }
            let improves = distances
                .get(&edge.to)
                .map_or(true, |&known| candidate < known);
            if improves {
                distances.insert(edge.to, candidate);
                predecessors.insert(edge.to, current);
                seq += 1;
                heap.push(MinScored::new(candidate, seq, edge.to));
            }
        }
    }

    log::debug!(
        "Dijkstra from {} settled {} vertices",
        start,
        settled.len()
    );

    Ok(ShortestPaths {
        start,
        distances,
        predecessors,
    })
}

/// Outcome of reconstructing a Bellman-Ford path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathLookup {
    /// Vertices from the start to the target, both included.
    Found(Vec<NodeId>),
    /// The target was never reached.
    Unreachable,
    /// The target's distance is negative infinity.
    ThroughNegativeCycle,
}

/// Result of a Bellman-Ford run.
///
/// Check [`BellmanFord::has_negative_cycle`] before trusting distances:
/// vertices reachable from a negative cycle carry `f64::NEG_INFINITY`.
#[derive(Debug, Clone)]
pub struct BellmanFord {
    start: NodeId,
    distances: HashMap<NodeId, f64>,
    predecessors: HashMap<NodeId, NodeId>,
    has_negative_cycle: bool,
    cycle_reachable: Vec<NodeId>,
    passes: usize,
}

impl BellmanFord {
    /// The start vertex.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Distance to `node`: `+inf` when unreached, `-inf` when reachable
    /// from a negative cycle, `None` for handles outside the graph.
    pub fn distance(&self, node: NodeId) -> Option<f64> {
        self.distances.get(&node).copied()
    }

    /// Distance of every vertex.
    pub fn distances(&self) -> &HashMap<NodeId, f64> {
        &self.distances
    }

    /// Predecessor of `node` on its shortest path.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.predecessors.get(&node).copied()
    }

    /// Whether a negative cycle is reachable from the start.
    pub fn has_negative_cycle(&self) -> bool {
        self.has_negative_cycle
    }

    /// Vertices reachable from a negative cycle, in discovery order.
    pub fn cycle_reachable(&self) -> &[NodeId] {
        &self.cycle_reachable
    }

    /// Number of full relaxation passes performed.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Reconstruct the path from the start to `target`.
    pub fn path_to(&self, target: NodeId) -> PathLookup {
        match self.distance(target) {
            None => PathLookup::Unreachable,
            Some(d) if d == f64::NEG_INFINITY => PathLookup::ThroughNegativeCycle,
            Some(d) if d == f64::INFINITY => PathLookup::Unreachable,
            Some(_) => {
                match walk_predecessors(
                    &self.predecessors,
                    self.start,
                    target,
                    self.distances.len(),
                ) {
                    Some(path) => PathLookup::Found(path),
                    None => PathLookup::ThroughNegativeCycle,
                }
            }
        }
    }
}

/// Bellman-Ford from `start`, handling negative weights.
pub fn bellman_ford(graph: &Graph, start: NodeId) -> GraphResult<BellmanFord> {
    if !graph.contains(start) {
        return Err(GraphError::InvalidEndpoint(start));
    }

    let mut distances: HashMap<NodeId, f64> = graph
        .nodes()
        .iter()
        .map(|&id| (id, f64::INFINITY))
        .collect();
    distances.insert(start, 0.0);
    let mut predecessors: HashMap<NodeId, NodeId> = HashMap::new();

    let edges: Vec<(NodeId, NodeId, f64)> = graph
        .edges()
        .iter()
        .map(|e| (e.from, e.to, graph.effective_weight(e)))
        .collect();

    let mut passes = 0;
    for _ in 1..graph.vertex_count() {
        passes += 1;
        let mut changed = false;
        for &(u, v, w) in &edges {
            let du = distances[&u];
            if du == f64::INFINITY {
                continue;
            }
            if du + w < distances[&v] {
                distances.insert(v, du + w);
                predecessors.insert(v, u);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    // One more pass: anything that still relaxes sits behind a negative cycle.
    let mut cycle_reachable = Vec::new();
    let mut marked: HashSet<NodeId> = HashSet::new();
    for &(u, v, w) in &edges {
        let du = distances[&u];
        if du == f64::INFINITY || marked.contains(&v) {
            continue;
        }
        if du + w < distances[&v] {
            flood_negative(graph, v, &mut distances, &mut marked, &mut cycle_reachable);
        }
    }
    let has_negative_cycle = !cycle_reachable.is_empty();

    log::debug!(
        "Bellman-Ford from {} finished after {} passes (negative cycle: {})",
        start,
        passes,
        has_negative_cycle
    );

    Ok(BellmanFord {
        start,
        distances,
        predecessors,
        has_negative_cycle,
        cycle_reachable,
        passes,
    })
}

/// Mark every vertex reachable from `origin` with distance `-inf`.
fn flood_negative(
    graph: &Graph,
    origin: NodeId,
    distances: &mut HashMap<NodeId, f64>,
    marked: &mut HashSet<NodeId>,
    collected: &mut Vec<NodeId>,
) {
    let mut queue = VecDeque::new();
    if marked.insert(origin) {
        queue.push_back(origin);
    }
    while let Some(current) = queue.pop_front() {
        collected.push(current);
        distances.insert(current, f64::NEG_INFINITY);
        for edge in graph.edges_from(current) {
            if marked.insert(edge.to) {
                queue.push_back(edge.to);
            }
        }
    }
}

/// Follow predecessor links back from `target`. `None` if the chain does
/// not reach `start` within `limit` steps.
fn walk_predecessors(
    predecessors: &HashMap<NodeId, NodeId>,
    start: NodeId,
    target: NodeId,
    limit: usize,
) -> Option<Vec<NodeId>> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        path.push(current);
        if path.len() > limit + 1 {
            return None;
        }
    }
    path.reverse();
    Some(path)
}
