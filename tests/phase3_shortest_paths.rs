//! Phase 3 tests: Dijkstra, Bellman-Ford and Floyd-Warshall.

use rand::Rng;

use graph_engine::algo::PathLookup;
use graph_engine::graph::builder::vertex;
use graph_engine::types::error::GraphError;
use graph_engine::{bellman_ford, dijkstra, floyd_warshall, Graph, GraphBuilder, Value};

const EPS: f64 = 1e-9;

fn abc(c_weight: f64) -> Graph {
    GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 2.0)
        .weighted_link("B", "C", c_weight)
        .weighted_link("A", "C", 10.0)
        .build()
        .unwrap()
}

fn random_graph(vertices: usize, edges: usize) -> Graph {
    let mut rng = rand::thread_rng();
    let mut graph = Graph::new(true, true);
    let ids: Vec<_> = (0..vertices)
        .map(|i| graph.add_vertex(Value::from(i as i64)))
        .collect();
    for _ in 0..edges {
        let from = ids[rng.gen_range(0..vertices)];
        let to = ids[rng.gen_range(0..vertices)];
        graph.add_edge(from, to, rng.gen_range(0.0..10.0)).unwrap();
    }
    graph
}

// ==================== Dijkstra ====================

#[test]
fn test_dijkstra_prefers_cheaper_detour() {
    let graph = abc(3.0);
    let [a, b, c] = ["A", "B", "C"].map(|n| vertex(&graph, n).unwrap());
    let result = dijkstra(&graph, a).unwrap();

    assert_eq!(result.distance(a), Some(0.0));
    assert_eq!(result.distance(b), Some(2.0));
    assert_eq!(result.distance(c), Some(5.0));
    assert_eq!(result.path_to(c), Some(vec![a, b, c]));
}

#[test]
fn test_dijkstra_unreached_absent() {
    let mut graph = abc(3.0);
    let z = graph.add_vertex(Value::from("Z"));
    let a = vertex(&graph, "A").unwrap();
    let result = dijkstra(&graph, a).unwrap();
    assert_eq!(result.distance(z), None);
    assert_eq!(result.path_to(z), None);
    assert_eq!(result.distances().len(), 3);
}

#[test]
fn test_dijkstra_unweighted_uses_unit_weight() {
    let graph = GraphBuilder::new()
        .link("A", "B")
        .link("B", "C")
        .link("A", "C")
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    let c = vertex(&graph, "C").unwrap();
    assert_eq!(dijkstra(&graph, a).unwrap().distance(c), Some(1.0));
}

#[test]
fn test_dijkstra_rejects_negative_weight() {
    let graph = abc(-100.0);
    let a = vertex(&graph, "A").unwrap();
    assert!(matches!(
        dijkstra(&graph, a),
        Err(GraphError::NegativeWeight { weight, .. }) if weight == -100.0
    ));
}

// ==================== Bellman-Ford ====================

#[test]
fn test_bellman_ford_negative_edge() {
    let graph = abc(-100.0);
    let [a, b, c] = ["A", "B", "C"].map(|n| vertex(&graph, n).unwrap());
    let result = bellman_ford(&graph, a).unwrap();

    assert!(!result.has_negative_cycle());
    assert_eq!(result.distance(c), Some(-98.0));
    assert_eq!(result.predecessor(c), Some(b));
    assert_eq!(result.path_to(c), PathLookup::Found(vec![a, b, c]));
}

#[test]
fn test_bellman_ford_negative_cycle_flood() {
    let mut graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 1.0)
        .weighted_link("B", "C", -3.0)
        .weighted_link("C", "B", 1.0)
        .weighted_link("C", "D", 1.0)
        .build()
        .unwrap();
    let e = graph.add_vertex(Value::from("E"));
    let [a, b, c, d] = ["A", "B", "C", "D"].map(|n| vertex(&graph, n).unwrap());
    let result = bellman_ford(&graph, a).unwrap();

    assert!(result.has_negative_cycle());
    assert_eq!(result.distance(a), Some(0.0));
    for id in [b, c, d] {
        assert_eq!(result.distance(id), Some(f64::NEG_INFINITY));
        assert!(result.cycle_reachable().contains(&id));
    }
    assert_eq!(result.distance(e), Some(f64::INFINITY));
    assert_eq!(result.path_to(d), PathLookup::ThroughNegativeCycle);
    assert_eq!(result.path_to(e), PathLookup::Unreachable);
}

#[test]
fn test_bellman_ford_floods_every_negative_cycle() {
    // Two disjoint negative cycles, both reachable from S.
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("S", "A", 1.0)
        .weighted_link("A", "B", -2.0)
        .weighted_link("B", "A", 1.0)
        .weighted_link("S", "C", 1.0)
        .weighted_link("C", "D", -2.0)
        .weighted_link("D", "C", 1.0)
        .weighted_link("D", "T", 1.0)
        .weighted_link("S", "U", 4.0)
        .build()
        .unwrap();
    let [s, a, b, c, d, t, u] =
        ["S", "A", "B", "C", "D", "T", "U"].map(|n| vertex(&graph, n).unwrap());
    let result = bellman_ford(&graph, s).unwrap();

    assert!(result.has_negative_cycle());
    assert_eq!(result.distance(s), Some(0.0));
    assert_eq!(result.distance(u), Some(4.0));
    for id in [a, b, c, d, t] {
        assert_eq!(result.distance(id), Some(f64::NEG_INFINITY));
        assert!(result.cycle_reachable().contains(&id));
    }
    assert_eq!(result.cycle_reachable().len(), 5);
    assert_eq!(result.path_to(u), PathLookup::Found(vec![s, u]));
}

#[test]
fn test_bellman_ford_early_exit() {
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 1.0)
        .weighted_link("B", "C", 1.0)
        .weighted_link("C", "D", 1.0)
        .weighted_link("D", "E", 1.0)
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    let result = bellman_ford(&graph, a).unwrap();
    // Edges are listed in path order, so one pass settles everything.
    assert_eq!(result.passes(), 2);
}

#[test]
fn test_bellman_ford_single_vertex() {
    let mut graph = Graph::new(true, true);
    let a = graph.add_vertex(Value::from("A"));
    let result = bellman_ford(&graph, a).unwrap();
    assert_eq!(result.distance(a), Some(0.0));
    assert_eq!(result.passes(), 0);
    assert_eq!(result.path_to(a), PathLookup::Found(vec![a]));
}

#[test]
fn test_random_graphs_agree_with_dijkstra() {
    for _ in 0..20 {
        let graph = random_graph(25, 80);
        let start = graph.node_at(0).unwrap();
        let fast = dijkstra(&graph, start).unwrap();
        let general = bellman_ford(&graph, start).unwrap();
        assert!(!general.has_negative_cycle());

        for &id in graph.nodes() {
            let expected = general.distance(id).unwrap();
            match fast.distance(id) {
                Some(d) => assert!((d - expected).abs() < EPS, "{} vs {}", d, expected),
                None => assert_eq!(expected, f64::INFINITY),
            }
        }
    }
}

// ==================== Floyd-Warshall ====================

#[test]
fn test_floyd_warshall_basic() {
    let graph = abc(3.0);
    let [a, b, c] = ["A", "B", "C"].map(|n| vertex(&graph, n).unwrap());
    let matrix = floyd_warshall(&graph);

    assert_eq!(matrix.nodes(), &[a, b, c]);
    assert_eq!(matrix.get(a, c), Some(5.0));
    assert_eq!(matrix.get(b, b), Some(0.0));
    assert_eq!(matrix.get(c, a), Some(f64::INFINITY));
    assert_eq!(matrix.row(a), Some(&[0.0, 2.0, 5.0][..]));
    assert!(!matrix.has_negative_cycle());
}

#[test]
fn test_floyd_warshall_parallel_edges_keep_minimum() {
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 7.0)
        .weighted_link("A", "B", 3.0)
        .build()
        .unwrap();
    let a = vertex(&graph, "A").unwrap();
    let b = vertex(&graph, "B").unwrap();
    assert_eq!(floyd_warshall(&graph).get(a, b), Some(3.0));
}

#[test]
fn test_floyd_warshall_negative_cycle() {
    let graph = GraphBuilder::with_flags(true, true)
        .weighted_link("A", "B", 1.0)
        .weighted_link("B", "A", -2.0)
        .build()
        .unwrap();
    assert!(floyd_warshall(&graph).has_negative_cycle());
}

#[test]
fn test_floyd_warshall_empty() {
    let matrix = floyd_warshall(&Graph::default());
    assert!(matrix.nodes().is_empty());
    assert!(!matrix.has_negative_cycle());
}

#[test]
fn test_random_graphs_floyd_agrees_with_bellman_ford() {
    for _ in 0..10 {
        let graph = random_graph(15, 40);
        let matrix = floyd_warshall(&graph);
        for &u in graph.nodes() {
            let row = bellman_ford(&graph, u).unwrap();
            for &v in graph.nodes() {
                let expected = row.distance(v).unwrap();
                let got = matrix.get(u, v).unwrap();
                if expected.is_infinite() {
                    assert_eq!(got, expected);
                } else {
                    assert!((got - expected).abs() < EPS);
                }
            }
        }
    }
}
