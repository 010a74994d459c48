//! Phase 4 tests: minimum spanning tree and maximum flow.

use graph_engine::algo::{build_flow_network, FlowNetwork};
use graph_engine::graph::builder::vertex;
use graph_engine::types::error::GraphError;
use graph_engine::{edmonds_karp, prim, prim_all_starts, Graph, GraphBuilder, Value};

// ==================== Prim ====================

fn weighted_square() -> Graph {
    GraphBuilder::with_flags(false, true)
        .weighted_link("A", "B", 1.0)
        .weighted_link("B", "C", 2.0)
        .weighted_link("A", "C", 3.0)
        .weighted_link("C", "D", 1.0)
        .build()
        .unwrap()
}

#[test]
fn test_prim_spanning_tree() {
    let graph = weighted_square();
    let result = prim(&graph, None).unwrap();

    assert!(result.is_connected);
    assert_eq!(result.edges.len(), 3);
    assert_eq!(result.total_weight, 4.0);
    assert!(result.edges.iter().all(|e| e.weight != 3.0));
}

#[test]
fn test_prim_from_explicit_start() {
    let graph = weighted_square();
    let d = vertex(&graph, "D").unwrap();
    let result = prim(&graph, Some(d)).unwrap();
    assert_eq!(result.edges[0].from, d);
    assert_eq!(result.total_weight, 4.0);
}

#[test]
fn test_prim_unweighted_counts_edges() {
    let graph = GraphBuilder::with_flags(false, false)
        .link("A", "B")
        .link("B", "C")
        .link("C", "A")
        .build()
        .unwrap();
    let result = prim(&graph, None).unwrap();
    assert_eq!(result.total_weight, 2.0);
    assert!(result.is_connected);
}

#[test]
fn test_prim_disconnected() {
    let graph = GraphBuilder::with_flags(false, true)
        .weighted_link("A", "B", 1.0)
        .weighted_link("C", "D", 1.0)
        .build()
        .unwrap();
    let result = prim(&graph, None).unwrap();
    assert!(!result.is_connected);
    assert_eq!(result.edges.len(), 1);

    let all = prim_all_starts(&graph).unwrap();
    assert!(!all.is_connected);
}

#[test]
fn test_prim_oriented_not_applicable() {
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 1.0)
        .build()
        .unwrap();
    let result = prim(&graph, None).unwrap();
    assert!(!result.is_connected);
    assert!(result.edges.is_empty());
}

#[test]
fn test_prim_empty_graph_is_connected() {
    let graph = Graph::new(false, true);
    let result = prim(&graph, None).unwrap();
    assert!(result.is_connected);
    assert!(result.edges.is_empty());
    assert_eq!(result.total_weight, 0.0);
}

#[test]
fn test_prim_all_starts_matches_single_run() {
    let graph = weighted_square();
    let all = prim_all_starts(&graph).unwrap();
    assert!(all.is_connected);
    assert_eq!(all.total_weight, 4.0);
}

// ==================== Max flow ====================

#[test]
fn test_diamond_max_flow() {
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("S", "A", 3.0)
        .weighted_link("S", "B", 2.0)
        .weighted_link("A", "T", 2.0)
        .weighted_link("B", "T", 3.0)
        .build()
        .unwrap();
    let s = vertex(&graph, "S").unwrap();
    let t = vertex(&graph, "T").unwrap();
    let flow = edmonds_karp(&build_flow_network(&graph), s, t).unwrap();

    assert_eq!(flow.value, 4.0);
    assert_eq!(flow.min_cut_capacity(), 4.0);
    assert_eq!(flow.min_cut.len(), 2);
    assert!(flow.source_side.contains(&s));
    assert!(!flow.source_side.contains(&t));
}

#[test]
fn test_max_flow_needs_residual_back_arcs() {
    // Classic network with max flow 23.
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("s", "v1", 16.0)
        .weighted_link("s", "v2", 13.0)
        .weighted_link("v1", "v3", 12.0)
        .weighted_link("v2", "v1", 4.0)
        .weighted_link("v2", "v4", 14.0)
        .weighted_link("v3", "v2", 9.0)
        .weighted_link("v3", "t", 20.0)
        .weighted_link("v4", "v3", 7.0)
        .weighted_link("v4", "t", 4.0)
        .build()
        .unwrap();
    let s = vertex(&graph, "s").unwrap();
    let t = vertex(&graph, "t").unwrap();
    let network = build_flow_network(&graph);
    let flow = edmonds_karp(&network, s, t).unwrap();

    assert_eq!(flow.value, 23.0);
    assert_eq!(flow.min_cut_capacity(), 23.0);
    for (i, edge) in network.edges().iter().enumerate() {
        let f = flow.flow_on(i).unwrap();
        assert!(f >= 0.0 && f <= edge.capacity);
    }
}

#[test]
fn test_max_flow_unweighted_unit_capacity() {
    let graph = GraphBuilder::new()
        .link("S", "A")
        .link("S", "B")
        .link("A", "T")
        .link("B", "T")
        .link("A", "B")
        .build()
        .unwrap();
    let s = vertex(&graph, "S").unwrap();
    let t = vertex(&graph, "T").unwrap();
    assert_eq!(edmonds_karp(&build_flow_network(&graph), s, t).unwrap().value, 2.0);
}

#[test]
fn test_max_flow_non_oriented_both_ways() {
    let graph = GraphBuilder::with_flags(false, true)
        .weighted_link("A", "B", 3.0)
        .build()
        .unwrap();
    let network = FlowNetwork::from_graph(&graph);
    assert_eq!(network.edges().len(), 2);

    let a = vertex(&graph, "A").unwrap();
    let b = vertex(&graph, "B").unwrap();
    assert_eq!(edmonds_karp(&network, a, b).unwrap().value, 3.0);
    assert_eq!(edmonds_karp(&network, b, a).unwrap().value, 3.0);
}

#[test]
fn test_max_flow_drops_negative_and_promotes_zero_capacity() {
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", -5.0)
        .weighted_link("A", "C", 0.0)
        .build()
        .unwrap();
    let network = build_flow_network(&graph);
    assert_eq!(network.edges().len(), 1);
    assert_eq!(network.edges()[0].capacity, 1.0);
}

#[test]
fn test_max_flow_disconnected_sink() {
    let mut graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 5.0)
        .build()
        .unwrap();
    let z = graph.add_vertex(Value::from("Z"));
    let a = vertex(&graph, "A").unwrap();
    let flow = edmonds_karp(&build_flow_network(&graph), a, z).unwrap();
    assert_eq!(flow.value, 0.0);
    assert_eq!(flow.augmentations, 0);
    assert!(flow.min_cut.is_empty());
}

#[test]
fn test_max_flow_rejects_bad_endpoints() {
    let mut graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 5.0)
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    let b = vertex(&graph, "B").unwrap();
    let network = build_flow_network(&graph);

    assert!(matches!(
        edmonds_karp(&network, a, a),
        Err(GraphError::DegenerateFlow(_))
    ));

    graph.remove_vertex(b);
    let network = build_flow_network(&graph);
    assert!(matches!(
        edmonds_karp(&network, a, b),
        Err(GraphError::InvalidEndpoint(id)) if id == b
    ));
}
