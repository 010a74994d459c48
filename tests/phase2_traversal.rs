//! Phase 2 tests: traversal, connectivity and degree queries.

use graph_engine::graph::builder::vertex;
use graph_engine::graph::traversal::{
    bfs_distances, bfs_order, bfs_traverse, components, connected_components, degree_below,
    dfs_order, isolated_vertices, reachable_within, reachable_within_weighted, remove_isolated,
    weak_neighbors,
};
use graph_engine::types::error::GraphError;
use graph_engine::{Graph, GraphBuilder, NodeId, TraversalDirection, Value};

fn ids(graph: &Graph, names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|n| vertex(graph, *n).unwrap()).collect()
}

fn tree() -> Graph {
    GraphBuilder::new()
        .link("A", "B")
        .link("A", "C")
        .link("B", "D")
        .link("C", "D")
        .link("D", "E")
        .build()
        .unwrap()
}

// ==================== BFS / DFS ====================

#[test]
fn test_bfs_order_and_distances() {
    let graph = tree();
    let a = vertex(&graph, "A").unwrap();
    assert_eq!(
        bfs_order(&graph, a).unwrap(),
        ids(&graph, &["A", "B", "C", "D", "E"])
    );

    let dist = bfs_distances(&graph, a).unwrap();
    assert_eq!(dist[&vertex(&graph, "D").unwrap()], 2);
    assert_eq!(dist[&vertex(&graph, "E").unwrap()], 3);
}

#[test]
fn test_bfs_unreachable_absent() {
    let graph = tree();
    let d = vertex(&graph, "D").unwrap();
    let dist = bfs_distances(&graph, d).unwrap();
    assert_eq!(dist.len(), 2);
    assert!(!dist.contains_key(&vertex(&graph, "A").unwrap()));
}

#[test]
fn test_bfs_backward_with_depth_limit() {
    let graph = tree();
    let e = vertex(&graph, "E").unwrap();
    let (order, depths) = bfs_traverse(&graph, e, TraversalDirection::Backward, Some(2)).unwrap();
    assert_eq!(order, ids(&graph, &["E", "D", "B", "C"]));
    assert_eq!(depths[&vertex(&graph, "B").unwrap()], 2);
}

#[test]
fn test_dfs_pre_order() {
    let graph = tree();
    let a = vertex(&graph, "A").unwrap();
    assert_eq!(
        dfs_order(&graph, a).unwrap(),
        ids(&graph, &["A", "B", "D", "E", "C"])
    );
}

#[test]
fn test_traversal_rejects_unknown_start() {
    let mut graph = tree();
    let a = vertex(&graph, "A").unwrap();
    graph.remove_vertex(a);
    assert!(matches!(
        bfs_order(&graph, a),
        Err(GraphError::InvalidEndpoint(_))
    ));
    assert!(dfs_order(&graph, a).is_err());
}

// ==================== Connectivity ====================

#[test]
fn test_weak_components_on_oriented_graph() {
    let graph = GraphBuilder::new()
        .link("A", "B")
        .link("C", "B")
        .vertex("D")
        .build()
        .unwrap();
    assert_eq!(connected_components(&graph), 2);
    let comps = components(&graph);
    assert_eq!(comps[0].len(), 3);
    assert_eq!(comps[1], ids(&graph, &["D"]));
}

#[test]
fn test_components_non_oriented() {
    let graph = GraphBuilder::with_flags(false, false)
        .link(1i64, 2i64)
        .link(3i64, 4i64)
        .link(4i64, 5i64)
        .build()
        .unwrap();
    assert_eq!(connected_components(&graph), 2);
    assert_eq!(connected_components(&Graph::default()), 0);
}

#[test]
fn test_weak_neighbors_dedup() {
    let graph = GraphBuilder::new()
        .link("A", "B")
        .link("B", "A")
        .link("C", "A")
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    assert_eq!(weak_neighbors(&graph, a), ids(&graph, &["B", "C"]));
}

// ==================== Bounded reach ====================

#[test]
fn test_reachable_within_hops() {
    let graph = GraphBuilder::new()
        .link("A", "B")
        .link("B", "C")
        .link("C", "D")
        .link("D", "A")
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    assert_eq!(
        reachable_within(&graph, a, 2).unwrap(),
        ids(&graph, &["B", "C"])
    );
    assert!(reachable_within(&graph, a, 0).unwrap().is_empty());
    // The cycle back to A does not list the start.
    assert_eq!(reachable_within(&graph, a, 10).unwrap().len(), 3);
}

#[test]
fn test_reachable_within_weighted() {
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 1.0)
        .weighted_link("B", "C", 2.0)
        .weighted_link("A", "D", 5.0)
        .weighted_link("C", "D", 0.5)
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    assert_eq!(
        reachable_within_weighted(&graph, a, 3.0).unwrap(),
        ids(&graph, &["B", "C"])
    );
    assert_eq!(
        reachable_within_weighted(&graph, a, 3.5).unwrap(),
        ids(&graph, &["B", "C", "D"])
    );
}

#[test]
fn test_reachable_within_negative_weight() {
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", -1.0)
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    assert!(matches!(
        reachable_within_weighted(&graph, a, 10.0),
        Err(GraphError::NegativeWeight { .. })
    ));
}

#[test]
fn test_reachable_requires_oriented() {
    let graph = GraphBuilder::with_flags(false, false)
        .link("A", "B")
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    assert!(matches!(
        reachable_within(&graph, a, 1),
        Err(GraphError::NotApplicable { .. })
    ));
    assert!(matches!(
        reachable_within_weighted(&graph, a, 1.0),
        Err(GraphError::NotApplicable { .. })
    ));
}

// ==================== Degree queries ====================

#[test]
fn test_isolated_vertices_and_removal() {
    let mut graph = GraphBuilder::new()
        .link("A", "B")
        .vertex("C")
        .build()
        .unwrap();
    assert_eq!(isolated_vertices(&graph), ids(&graph, &["A", "C"]));

    let removed = remove_isolated(&mut graph);
    assert_eq!(removed, vec![Value::from("A"), Value::from("C")]);
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_self_loop_is_not_isolated() {
    let graph = GraphBuilder::new().link("A", "A").build().unwrap();
    assert!(isolated_vertices(&graph).is_empty());
}

#[test]
fn test_degree_below() {
    let graph = GraphBuilder::new()
        .link("A", "B")
        .link("A", "C")
        .link("B", "C")
        .build()
        .unwrap();
    let [a, b, c] = ids(&graph, &["A", "B", "C"])[..] else {
        panic!("missing vertices");
    };
    assert_eq!(degree_below(&graph, c).unwrap(), vec![a, b]);
    assert_eq!(degree_below(&graph, b).unwrap(), vec![a]);
    assert!(degree_below(&graph, a).unwrap().is_empty());
}
