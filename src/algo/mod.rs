//! Graph algorithms operating on a [`crate::graph::Graph`].

pub mod all_pairs;
pub mod equal_paths;
pub mod flow;
pub mod metrics;
pub mod mst;
mod queue;
pub mod shortest_path;

pub use all_pairs::{floyd_warshall, DistanceMatrix};
pub use equal_paths::{
    all_path_lengths, equal_distance_vertex, equal_length_vertex_any_path,
    find_equal_length_vertex, EqualLengthMatch, MatchStrategy, PathBudget,
};
pub use flow::{build_flow_network, edmonds_karp, FlowEdge, FlowNetwork, MaxFlow};
pub use metrics::{cyclomatic_number, cyclomatic_report, knots, CyclomaticReport};
pub use mst::{prim, prim_all_starts, MstResult};
pub use shortest_path::{
    bellman_ford, dijkstra, dijkstra_bounded, BellmanFord, PathLookup, ShortestPaths,
};
