//! Common vertices reachable from two starts by paths of equal length.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::graph::traversal::bfs_distances;
use crate::graph::Graph;
use crate::types::{GraphError, GraphResult, NodeId};

/// Limits for the exhaustive simple-path enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathBudget {
    /// Longest path (in edges) that is extended further.
    pub max_depth: usize,
    /// Maximum number of paths recorded per start before giving up.
    pub max_paths: usize,
}

impl Default for PathBudget {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_paths: 100_000,
        }
    }
}

/// Which search produced an [`EqualLengthMatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Both BFS distances agree.
    ShortestPaths,
    /// Some simple path from each start has the same length.
    AllSimplePaths,
}

/// A vertex reachable from both starts with paths of `length` edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EqualLengthMatch {
    pub vertex: NodeId,
    pub length: usize,
    pub strategy: MatchStrategy,
}

/// First vertex (display order) whose BFS distance from `u` equals its
/// BFS distance from `v`.
///
/// Only shortest paths are compared, so a vertex reachable with equal
/// lengths only via a longer path is missed.
pub fn equal_distance_vertex(
    graph: &Graph,
    u: NodeId,
    v: NodeId,
) -> GraphResult<Option<EqualLengthMatch>> {
    let from_u = bfs_distances(graph, u)?;
    let from_v = bfs_distances(graph, v)?;
    Ok(graph.nodes().iter().find_map(|&vertex| {
        match (from_u.get(&vertex), from_v.get(&vertex)) {
            (Some(&du), Some(&dv)) if du == dv => Some(EqualLengthMatch {
                vertex,
                length: du,
                strategy: MatchStrategy::ShortestPaths,
            }),
            _ => None,
        }
    }))
}

/// Length of every simple path from `start` to every reachable vertex.
///
/// Exponential in the worst case; bounded by `budget`.
pub fn all_path_lengths(
    graph: &Graph,
    start: NodeId,
    budget: &PathBudget,
) -> GraphResult<HashMap<NodeId, BTreeSet<usize>>> {
    if !graph.contains(start) {
        return Err(GraphError::InvalidEndpoint(start));
    }
    let mut lengths: HashMap<NodeId, BTreeSet<usize>> = HashMap::new();
    let mut on_path: HashSet<NodeId> = HashSet::from([start]);
    let mut explored = 0usize;
    extend_paths(
        graph,
        start,
        0,
        &mut on_path,
        &mut lengths,
        &mut explored,
        budget,
    )?;
    Ok(lengths)
}

fn extend_paths(
    graph: &Graph,
    current: NodeId,
    length: usize,
    on_path: &mut HashSet<NodeId>,
    lengths: &mut HashMap<NodeId, BTreeSet<usize>>,
    explored: &mut usize,
    budget: &PathBudget,
) -> GraphResult<()> {
    *explored += 1;
    if *explored > budget.max_paths {
        log::warn!(
            "Path enumeration stopped after {} paths (limit {})",
            *explored - 1,
            budget.max_paths
        );
        return Err(GraphError::BudgetExceeded {
            explored: *explored - 1,
        });
    }
    lengths.entry(current).or_default().insert(length);
    if length >= budget.max_depth {
        return Ok(());
    }
    for edge in graph.edges_from(current) {
        if on_path.insert(edge.to) {
            let result = extend_paths(
                graph,
                edge.to,
                length + 1,
                on_path,
                lengths,
                explored,
                budget,
            );
            on_path.remove(&edge.to);
            result?;
        }
    }
    Ok(())
}

/// First vertex (display order) with a simple path of the same length
/// from both `u` and `v`, shortest common length first.
pub fn equal_length_vertex_any_path(
    graph: &Graph,
    u: NodeId,
    v: NodeId,
    budget: &PathBudget,
) -> GraphResult<Option<EqualLengthMatch>> {
    let from_u = all_path_lengths(graph, u, budget)?;
    let from_v = all_path_lengths(graph, v, budget)?;
    Ok(graph.nodes().iter().find_map(|&vertex| {
        let lu = from_u.get(&vertex)?;
        let lv = from_v.get(&vertex)?;
        lu.intersection(lv).next().map(|&length| EqualLengthMatch {
            vertex,
            length,
            strategy: MatchStrategy::AllSimplePaths,
        })
    }))
}

/// Try [`equal_distance_vertex`], then fall back to
/// [`equal_length_vertex_any_path`].
pub fn find_equal_length_vertex(
    graph: &Graph,
    u: NodeId,
    v: NodeId,
    budget: &PathBudget,
) -> GraphResult<Option<EqualLengthMatch>> {
    if let Some(found) = equal_distance_vertex(graph, u, v)? {
        return Ok(Some(found));
    }
    log::debug!("No equal shortest distances from {} and {}, enumerating all paths", u, v);
    equal_length_vertex_any_path(graph, u, v, budget)
}
