//! In-memory graph model and traversal.

pub mod builder;
pub mod model;
pub mod traversal;

pub use builder::GraphBuilder;
pub use model::Graph;
pub use traversal::{
    bfs_distances, bfs_order, bfs_traverse, components, connected_components, degree_below,
    dfs_order, isolated_vertices, reachable_within, reachable_within_weighted, remove_isolated,
    weak_neighbors, TraversalDirection,
};
