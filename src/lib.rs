//! graph-engine: an in-memory graph with classical algorithms.
//!
//! A single mutable [`Graph`] holds vertices carrying [`Value`]s and directed
//! edge records with weights. Oriented/non-oriented and weighted/unweighted
//! behaviour is selected per graph. The algorithms in [`algo`] and
//! [`graph::traversal`] all read the same model.

pub mod algo;
pub mod cli;
pub mod format;
pub mod graph;
pub mod types;

// Re-export commonly used types at the crate root
pub use algo::{
    bellman_ford, cyclomatic_number, dijkstra, edmonds_karp, find_equal_length_vertex,
    floyd_warshall, knots, prim, prim_all_starts, BellmanFord, DistanceMatrix, FlowNetwork,
    MaxFlow, MstResult, PathBudget, ShortestPaths,
};
pub use format::{GraphReader, GraphWriter};
pub use graph::{Graph, GraphBuilder, TraversalDirection};
pub use types::{
    Edge, EdgeId, GraphError, GraphResult, NodeId, Value, UNIT_WEIGHT, UNWEIGHTED_EDGE_WEIGHT,
};
