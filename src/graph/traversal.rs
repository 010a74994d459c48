//! Graph traversal and connectivity (BFS, DFS, components, bounded reach).

use std::collections::{HashMap, HashSet, VecDeque};

use crate::algo::shortest_path::dijkstra_bounded;
use crate::types::{GraphError, GraphResult, NodeId, Value};

use super::Graph;

/// Direction for graph traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    /// Follow outgoing edges (from -> to).
    Forward,
    /// Follow incoming edges (to <- from).
    Backward,
    /// Follow edges in both directions.
    Both,
}

/// Neighbour lookup for one traversal, with the inbound index built once.
struct Neighborhood<'g> {
    graph: &'g Graph,
    direction: TraversalDirection,
    inbound: HashMap<NodeId, Vec<NodeId>>,
}

impl<'g> Neighborhood<'g> {
    fn new(graph: &'g Graph, direction: TraversalDirection) -> Self {
        let mut inbound: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        if direction != TraversalDirection::Forward {
            for &id in graph.nodes() {
                for edge in graph.edges_from(id) {
                    inbound.entry(edge.to).or_default().push(edge.from);
                }
            }
        }
        Self {
            graph,
            direction,
            inbound,
        }
    }

    fn of(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        if self.direction != TraversalDirection::Backward {
            result.extend(self.graph.edges_from(node).iter().map(|e| e.to));
        }
        if self.direction != TraversalDirection::Forward {
            if let Some(sources) = self.inbound.get(&node) {
                result.extend(sources.iter().copied());
            }
        }
        result
    }
}

/// BFS from a starting vertex.
///
/// Returns the discovery order and the hop distance of every reached
/// vertex. Vertices deeper than `max_depth` are not discovered.
pub fn bfs_traverse(
    graph: &Graph,
    start: NodeId,
    direction: TraversalDirection,
    max_depth: Option<usize>,
) -> GraphResult<(Vec<NodeId>, HashMap<NodeId, usize>)> {
    if !graph.contains(start) {
        return Err(GraphError::InvalidEndpoint(start));
    }

    let neighborhood = Neighborhood::new(graph, direction);
    let mut order: Vec<NodeId> = vec![start];
    let mut depths: HashMap<NodeId, usize> = HashMap::new();
    let mut queue: VecDeque<NodeId> = VecDeque::new();

    depths.insert(start, 0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let depth = depths[&current];
        if max_depth.is_some_and(|max| depth >= max) {
            continue;
        }
        for neighbor in neighborhood.of(current) {
            if depths.contains_key(&neighbor) {
                continue;
            }
            depths.insert(neighbor, depth + 1);
            order.push(neighbor);
            queue.push_back(neighbor);
        }
    }

    Ok((order, depths))
}

/// Vertices reachable over outgoing edges, in BFS discovery order.
pub fn bfs_order(graph: &Graph, start: NodeId) -> GraphResult<Vec<NodeId>> {
    bfs_traverse(graph, start, TraversalDirection::Forward, None).map(|(order, _)| order)
}

/// Hop distance from `start` to every reachable vertex. Unreachable
/// vertices are absent from the map.
pub fn bfs_distances(graph: &Graph, start: NodeId) -> GraphResult<HashMap<NodeId, usize>> {
    bfs_traverse(graph, start, TraversalDirection::Forward, None).map(|(_, depths)| depths)
}

/// Vertices reachable over outgoing edges, in DFS pre-order.
///
/// Neighbours are explored in bucket order.
pub fn dfs_order(graph: &Graph, start: NodeId) -> GraphResult<Vec<NodeId>> {
    if !graph.contains(start) {
        return Err(GraphError::InvalidEndpoint(start));
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        order.push(current);
        // Reverse so the first edge in the bucket is explored first.
        for edge in graph.edges_from(current).iter().rev() {
            if !visited.contains(&edge.to) {
                stack.push(edge.to);
            }
        }
    }

    Ok(order)
}

/// Out- and in-neighbours of a vertex, each listed once.
pub fn weak_neighbors(graph: &Graph, node: NodeId) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    let outgoing = graph.edges_from(node).iter().map(|e| e.to);
    let incoming = graph
        .nodes()
        .iter()
        .flat_map(|&id| graph.edges_from(id))
        .filter(|e| e.to == node)
        .map(|e| e.from);
    for neighbor in outgoing.chain(incoming) {
        if seen.insert(neighbor) {
            result.push(neighbor);
        }
    }
    result
}

/// Connected components, each listed in BFS order.
///
/// Oriented graphs are split into weakly connected components: edge
/// direction is ignored while covering the graph.
pub fn components(graph: &Graph) -> Vec<Vec<NodeId>> {
    let direction = if graph.is_oriented() {
        TraversalDirection::Both
    } else {
        TraversalDirection::Forward
    };
    let neighborhood = Neighborhood::new(graph, direction);
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut result = Vec::new();

    for &root in graph.nodes() {
        if !visited.insert(root) {
            continue;
        }
        let mut component = vec![root];
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            for neighbor in neighborhood.of(current) {
                if visited.insert(neighbor) {
                    component.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        result.push(component);
    }

    result
}

/// Number of (weakly) connected components.
pub fn connected_components(graph: &Graph) -> usize {
    components(graph).len()
}

/// Vertices at most `max_hops` edges away from `start`, start excluded.
///
/// Only defined for oriented graphs.
pub fn reachable_within(graph: &Graph, start: NodeId, max_hops: usize) -> GraphResult<Vec<NodeId>> {
    require_oriented(graph, "reachable_within")?;
    let (_, depths) = bfs_traverse(graph, start, TraversalDirection::Forward, Some(max_hops))?;
    Ok(in_display_order(graph, |id| id != start && depths.contains_key(&id)))
}

/// Vertices whose weighted distance from `start` is at most
/// `max_distance`, start excluded.
///
/// Only defined for oriented graphs. Unweighted graphs count each edge as 1.
pub fn reachable_within_weighted(
    graph: &Graph,
    start: NodeId,
    max_distance: f64,
) -> GraphResult<Vec<NodeId>> {
    require_oriented(graph, "reachable_within_weighted")?;
    let paths = dijkstra_bounded(graph, start, Some(max_distance))?;
    Ok(in_display_order(graph, |id| {
        id != start && paths.distance(id).is_some_and(|d| d <= max_distance)
    }))
}

/// Vertices that no edge points to.
pub fn isolated_vertices(graph: &Graph) -> Vec<NodeId> {
    let degrees = graph.in_degrees();
    in_display_order(graph, |id| degrees.get(&id).copied().unwrap_or(0) == 0)
}

/// Delete every vertex returned by [`isolated_vertices`], returning their values.
pub fn remove_isolated(graph: &mut Graph) -> Vec<Value> {
    let isolated = isolated_vertices(graph);
    let removed: Vec<Value> = isolated
        .into_iter()
        .filter_map(|id| graph.remove_vertex(id))
        .collect();
    log::debug!("Removed {} isolated vertices", removed.len());
    removed
}

/// Vertices whose in-degree is strictly below that of `reference`.
pub fn degree_below(graph: &Graph, reference: NodeId) -> GraphResult<Vec<NodeId>> {
    if !graph.contains(reference) {
        return Err(GraphError::InvalidEndpoint(reference));
    }
    let degrees = graph.in_degrees();
    let threshold = degrees.get(&reference).copied().unwrap_or(0);
    Ok(in_display_order(graph, |id| {
        degrees.get(&id).copied().unwrap_or(0) < threshold
    }))
}

pub(crate) fn require_oriented(graph: &Graph, operation: &'static str) -> GraphResult<()> {
    if graph.is_oriented() {
        Ok(())
    } else {
        Err(GraphError::NotApplicable {
            operation,
            requires: "oriented",
        })
    }
}

fn in_display_order(graph: &Graph, keep: impl Fn(NodeId) -> bool) -> Vec<NodeId> {
    graph.nodes().iter().copied().filter(|&id| keep(id)).collect()
}
