//! CLI command implementations.

use std::path::Path;

use crate::algo::{
    bellman_ford, build_flow_network, cyclomatic_report, dijkstra, edmonds_karp, floyd_warshall,
    find_equal_length_vertex, knots, prim, prim_all_starts, MatchStrategy, PathBudget, PathLookup,
};
use crate::format::{GraphReader, GraphWriter};
use crate::graph::traversal::{
    degree_below, isolated_vertices, reachable_within, reachable_within_weighted, remove_isolated,
};
use crate::graph::Graph;
use crate::types::{GraphError, GraphResult, NodeId, Value};

/// Create a new empty graph file.
pub fn cmd_create(path: &Path, oriented: bool, weighted: bool) -> GraphResult<()> {
    let graph = Graph::new(oriented, weighted);
    GraphWriter::write_to_file(&graph, path)?;
    println!("Created {}", path.display());
    Ok(())
}

/// Display information about a graph file.
pub fn cmd_info(path: &Path, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let file_size = std::fs::metadata(path)?.len();

    if json {
        let info = serde_json::json!({
            "file": path.display().to_string(),
            "oriented": graph.is_oriented(),
            "weighted": graph.is_weighted(),
            "vertices": graph.vertex_count(),
            "edges": graph.edge_count(),
            "stored_edges": graph.stored_edge_count(),
            "file_size": file_size,
        });
        print_json(&info);
    } else {
        println!("File: {}", path.display());
        println!("Kind: {}", kind_label(&graph));
        println!("Vertices: {}", graph.vertex_count());
        println!("Edges: {}", graph.edge_count());
        println!("Stored edge records: {}", graph.stored_edge_count());
        println!("File size: {} B", file_size);
    }
    Ok(())
}

/// Add a vertex. The value is type-sniffed like values in the file format.
///
/// Files address vertices by value, so a value already present is refused.
pub fn cmd_add_vertex(path: &Path, value: &str, json: bool) -> GraphResult<()> {
    let mut graph = GraphReader::read_from_file(path)?;
    let value = Value::parse(value);
    if graph.find_vertex(&value).is_some() {
        return Err(GraphError::DuplicateVertex(value));
    }
    let kind = value.kind();
    let id = graph.add_vertex(value);
    GraphWriter::write_to_file(&graph, path)?;

    let index = graph.vertex_count() - 1;
    if json {
        print_json(&serde_json::json!({
            "index": index,
            "value": graph.value(id),
            "kind": kind,
        }));
    } else {
        println!("Added vertex [{}] {} ({})", index, label(&graph, id), kind);
    }
    Ok(())
}

/// Add an edge between two vertices given by display index.
pub fn cmd_add_edge(
    path: &Path,
    from: usize,
    to: usize,
    weight: Option<f64>,
    json: bool,
) -> GraphResult<()> {
    let mut graph = GraphReader::read_from_file(path)?;
    let from_id = resolve(&graph, from)?;
    let to_id = resolve(&graph, to)?;
    let weight = weight.unwrap_or(0.0);
    graph.add_edge(from_id, to_id, weight)?;
    GraphWriter::write_to_file(&graph, path)?;

    let arrow = if graph.is_oriented() { "->" } else { "--" };
    if json {
        print_json(&serde_json::json!({"from": from, "to": to, "weight": weight}));
    } else if graph.is_weighted() {
        println!(
            "Linked {} {} {} ({})",
            label(&graph, from_id),
            arrow,
            label(&graph, to_id),
            weight
        );
    } else {
        println!(
            "Linked {} {} {}",
            label(&graph, from_id),
            arrow,
            label(&graph, to_id)
        );
    }
    Ok(())
}

/// Remove a vertex by display index, with every edge touching it.
pub fn cmd_remove_vertex(path: &Path, index: usize, json: bool) -> GraphResult<()> {
    let mut graph = GraphReader::read_from_file(path)?;
    let id = resolve(&graph, index)?;
    let removed = graph
        .remove_vertex(id)
        .ok_or(GraphError::InvalidEndpoint(id))?;
    GraphWriter::write_to_file(&graph, path)?;

    if json {
        print_json(&serde_json::json!({"index": index, "value": removed}));
    } else {
        println!("Removed vertex [{}] {}", index, removed);
    }
    Ok(())
}

/// Remove an edge by its position in the `edges` listing.
///
/// On non-oriented graphs the mirror record goes too.
pub fn cmd_remove_edge(path: &Path, index: usize, json: bool) -> GraphResult<()> {
    let mut graph = GraphReader::read_from_file(path)?;
    let listing = graph.edges();
    let edge = listing.get(index).ok_or(GraphError::IndexOutOfRange {
        index,
        len: listing.len(),
    })?;
    let removed = graph.remove_edge(edge.id)?;
    GraphWriter::write_to_file(&graph, path)?;

    if json {
        print_json(&serde_json::json!({
            "index": index,
            "records_removed": removed.len(),
        }));
    } else {
        println!(
            "Removed edge {} -> {} ({} record(s))",
            label(&graph, edge.from),
            label(&graph, edge.to),
            removed.len()
        );
    }
    Ok(())
}

/// List vertices with their display indices.
pub fn cmd_vertices(path: &Path, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;

    if json {
        let list: Vec<serde_json::Value> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                serde_json::json!({
                    "index": i,
                    "value": graph.value(id),
                    "out_degree": graph.edges_from(id).len(),
                    "in_degree": graph.in_degree(id),
                })
            })
            .collect();
        print_json(&serde_json::Value::Array(list));
    } else {
        for (i, &id) in graph.nodes().iter().enumerate() {
            println!("[{}] {}", i, label(&graph, id));
        }
    }
    Ok(())
}

/// List every stored edge record with its display index.
pub fn cmd_edges(path: &Path, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let listing = graph.edges();

    if json {
        let list: Vec<serde_json::Value> = listing
            .iter()
            .enumerate()
            .map(|(i, e)| {
                serde_json::json!({
                    "index": i,
                    "from": graph.value(e.from),
                    "to": graph.value(e.to),
                    "weight": e.weight,
                })
            })
            .collect();
        print_json(&serde_json::Value::Array(list));
    } else {
        for (i, e) in listing.iter().enumerate() {
            if graph.is_weighted() {
                println!(
                    "[{}] {} -> {} ({})",
                    i,
                    label(&graph, e.from),
                    label(&graph, e.to),
                    e.weight
                );
            } else {
                println!("[{}] {} -> {}", i, label(&graph, e.from), label(&graph, e.to));
            }
        }
    }
    Ok(())
}

/// Print the adjacency list.
pub fn cmd_adjacency(path: &Path, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;

    if json {
        let mut map = serde_json::Map::new();
        for &id in graph.nodes() {
            let targets: Vec<serde_json::Value> = graph
                .edges_from(id)
                .iter()
                .map(|e| serde_json::json!({"to": graph.value(e.to), "weight": e.weight}))
                .collect();
            map.insert(label(&graph, id), serde_json::Value::Array(targets));
        }
        print_json(&serde_json::Value::Object(map));
    } else {
        for &id in graph.nodes() {
            let targets: Vec<String> = graph
                .edges_from(id)
                .iter()
                .map(|e| {
                    if graph.is_weighted() {
                        format!("{}({})", label(&graph, e.to), e.weight)
                    } else {
                        label(&graph, e.to)
                    }
                })
                .collect();
            println!("{}: {}", label(&graph, id), targets.join(", "));
        }
    }
    Ok(())
}

/// Change the orientation and weighting flags. Stored edges are unchanged.
pub fn cmd_retype(
    path: &Path,
    oriented: Option<bool>,
    weighted: Option<bool>,
    json: bool,
) -> GraphResult<()> {
    let mut graph = GraphReader::read_from_file(path)?;
    let oriented = oriented.unwrap_or(graph.is_oriented());
    let weighted = weighted.unwrap_or(graph.is_weighted());
    graph.retype(oriented, weighted);
    GraphWriter::write_to_file(&graph, path)?;

    if json {
        print_json(&serde_json::json!({"oriented": oriented, "weighted": weighted}));
    } else {
        println!("Graph is now {}", kind_label(&graph));
    }
    Ok(())
}

/// List vertices carrying a self-loop.
pub fn cmd_knots(path: &Path, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let found = knots(&graph)?;
    print_vertex_list(&graph, &found, "Knots", json);
    Ok(())
}

/// List vertices whose in-degree is below that of the given vertex.
pub fn cmd_degree_below(path: &Path, index: usize, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let reference = resolve(&graph, index)?;
    let found = degree_below(&graph, reference)?;
    let heading = format!(
        "In-degree below {} ({})",
        label(&graph, reference),
        graph.in_degree(reference)
    );
    print_vertex_list(&graph, &found, &heading, json);
    Ok(())
}

/// Delete every vertex with in-degree zero.
pub fn cmd_remove_isolated(path: &Path, dry_run: bool, json: bool) -> GraphResult<()> {
    let mut graph = GraphReader::read_from_file(path)?;
    let removed: Vec<Value> = if dry_run {
        isolated_vertices(&graph)
            .into_iter()
            .filter_map(|id| graph.value(id).cloned())
            .collect()
    } else {
        let removed = remove_isolated(&mut graph);
        GraphWriter::write_to_file(&graph, path)?;
        removed
    };

    if json {
        print_json(&serde_json::json!({"removed": removed, "dry_run": dry_run}));
    } else if removed.is_empty() {
        println!("No isolated vertices");
    } else {
        let verb = if dry_run { "Would remove" } else { "Removed" };
        let names: Vec<String> = removed.iter().map(Value::to_string).collect();
        println!("{} {} vertices: {}", verb, removed.len(), names.join(", "));
    }
    Ok(())
}

/// Print the cyclomatic number and its inputs.
pub fn cmd_cyclomatic(path: &Path, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let report = cyclomatic_report(&graph);

    if json {
        print_json(&serde_json::to_value(report).unwrap_or_default());
    } else {
        println!(
            "Cyclomatic number: {} (e={}, v={}, p={})",
            report.number, report.edges, report.vertices, report.components
        );
    }
    Ok(())
}

/// Find a vertex reachable from both `u` and `v` by paths of equal length.
pub fn cmd_equal_path(
    path: &Path,
    u: usize,
    v: usize,
    budget: PathBudget,
    json: bool,
) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let u_id = resolve(&graph, u)?;
    let v_id = resolve(&graph, v)?;
    let found = find_equal_length_vertex(&graph, u_id, v_id, &budget)?;

    match found {
        Some(m) => {
            let strategy = match m.strategy {
                MatchStrategy::ShortestPaths => "shortest paths",
                MatchStrategy::AllSimplePaths => "all simple paths",
            };
            if json {
                print_json(&serde_json::json!({
                    "vertex": graph.value(m.vertex),
                    "index": graph.index_of(m.vertex),
                    "length": m.length,
                    "strategy": m.strategy,
                }));
            } else {
                println!(
                    "{} is reachable from {} and {} in {} step(s) ({})",
                    label(&graph, m.vertex),
                    label(&graph, u_id),
                    label(&graph, v_id),
                    m.length,
                    strategy
                );
            }
            Ok(())
        }
        None => Err(GraphError::NotFound(format!(
            "no vertex reachable from {} and {} by equal-length paths",
            label(&graph, u_id),
            label(&graph, v_id)
        ))),
    }
}

/// Vertices reachable within a hop count or a weighted distance.
pub fn cmd_reachable(
    path: &Path,
    start: usize,
    hops: Option<usize>,
    distance: Option<f64>,
    json: bool,
) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let start_id = resolve(&graph, start)?;
    let (found, heading) = match distance {
        Some(limit) => (
            reachable_within_weighted(&graph, start_id, limit)?,
            format!("Within distance {} of {}", limit, label(&graph, start_id)),
        ),
        None => {
            let hops = hops.unwrap_or(1);
            (
                reachable_within(&graph, start_id, hops)?,
                format!("Within {} hop(s) of {}", hops, label(&graph, start_id)),
            )
        }
    };
    print_vertex_list(&graph, &found, &heading, json);
    Ok(())
}

/// Single-source shortest distances with Dijkstra.
///
/// With `target` only that vertex is reported, and a target the start cannot
/// reach fails with [`GraphError::Unreachable`].
pub fn cmd_dijkstra(
    path: &Path,
    start: usize,
    target: Option<usize>,
    json: bool,
) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let start_id = resolve(&graph, start)?;
    let result = dijkstra(&graph, start_id)?;

    let targets: Vec<NodeId> = match target {
        Some(index) => {
            let to = resolve(&graph, index)?;
            if result.distance(to).is_none() {
                return Err(GraphError::Unreachable { from: start_id, to });
            }
            vec![to]
        }
        None => graph.nodes().to_vec(),
    };
    let rows: Vec<(NodeId, f64, Option<Vec<NodeId>>)> = targets
        .into_iter()
        .map(|id| {
            let d = result.distance(id).unwrap_or(f64::INFINITY);
            (id, d, result.path_to(id))
        })
        .collect();
    print_distances(&graph, start_id, &rows, json);
    Ok(())
}

/// Single-source shortest distances with Bellman-Ford.
pub fn cmd_bellman_ford(path: &Path, start: usize, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let start_id = resolve(&graph, start)?;
    let result = bellman_ford(&graph, start_id)?;

    let rows: Vec<(NodeId, f64, Option<Vec<NodeId>>)> = graph
        .nodes()
        .iter()
        .map(|&id| {
            let d = result.distance(id).unwrap_or(f64::INFINITY);
            let path = match result.path_to(id) {
                PathLookup::Found(p) => Some(p),
                PathLookup::Unreachable | PathLookup::ThroughNegativeCycle => None,
            };
            (id, d, path)
        })
        .collect();

    if json {
        let mut out = distances_json(&graph, start_id, &rows);
        out["negative_cycle"] = serde_json::json!(result.has_negative_cycle());
        out["passes"] = serde_json::json!(result.passes());
        print_json(&out);
    } else {
        print_distances(&graph, start_id, &rows, false);
        if result.has_negative_cycle() {
            let names: Vec<String> = result
                .cycle_reachable()
                .iter()
                .map(|&id| label(&graph, id))
                .collect();
            println!("Negative cycle reaches: {}", names.join(", "));
        }
    }
    Ok(())
}

/// All-pairs distance matrix with Floyd-Warshall.
pub fn cmd_floyd(path: &Path, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let matrix = floyd_warshall(&graph);
    let labels: Vec<String> = matrix.nodes().iter().map(|&id| label(&graph, id)).collect();

    if json {
        let rows: Vec<Vec<serde_json::Value>> = matrix
            .nodes()
            .iter()
            .map(|&u| {
                matrix
                    .row(u)
                    .unwrap_or(&[])
                    .iter()
                    .map(|&d| distance_json(d))
                    .collect()
            })
            .collect();
        print_json(&serde_json::json!({
            "vertices": labels,
            "distances": rows,
            "negative_cycle": matrix.has_negative_cycle(),
        }));
    } else {
        println!("\t{}", labels.join("\t"));
        for (i, &u) in matrix.nodes().iter().enumerate() {
            let cells: Vec<String> = matrix
                .row(u)
                .unwrap_or(&[])
                .iter()
                .map(|&d| format_distance(d))
                .collect();
            println!("{}\t{}", labels[i], cells.join("\t"));
        }
        if matrix.has_negative_cycle() {
            println!("Warning: graph contains a negative cycle");
        }
    }
    Ok(())
}

/// Minimum spanning tree with Prim.
pub fn cmd_mst(path: &Path, start: Option<usize>, all_starts: bool, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    if graph.is_oriented() {
        return Err(GraphError::NotApplicable {
            operation: "mst",
            requires: "non-oriented",
        });
    }
    let result = if all_starts {
        prim_all_starts(&graph)?
    } else {
        let start = start.map(|i| resolve(&graph, i)).transpose()?;
        prim(&graph, start)?
    };

    if json {
        let edges: Vec<serde_json::Value> = result
            .edges
            .iter()
            .map(|e| {
                serde_json::json!({
                    "from": graph.value(e.from),
                    "to": graph.value(e.to),
                    "weight": graph.effective_weight(e),
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "edges": edges,
            "total_weight": result.total_weight,
            "connected": result.is_connected,
        }));
    } else {
        for e in &result.edges {
            println!(
                "{} -- {} ({})",
                label(&graph, e.from),
                label(&graph, e.to),
                graph.effective_weight(e)
            );
        }
        println!("Total weight: {}", result.total_weight);
        if !result.is_connected {
            println!("Graph is not connected: tree spans only part of it");
        }
    }
    Ok(())
}

/// Maximum flow and minimum cut between two vertices.
pub fn cmd_max_flow(path: &Path, source: usize, sink: usize, json: bool) -> GraphResult<()> {
    let graph = GraphReader::read_from_file(path)?;
    let source_id = resolve(&graph, source)?;
    let sink_id = resolve(&graph, sink)?;
    let network = build_flow_network(&graph);
    let flow = edmonds_karp(&network, source_id, sink_id)?;

    if json {
        let cut: Vec<serde_json::Value> = flow
            .min_cut
            .iter()
            .map(|e| {
                serde_json::json!({
                    "from": graph.value(e.from),
                    "to": graph.value(e.to),
                    "capacity": e.capacity,
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "value": flow.value,
            "augmentations": flow.augmentations,
            "min_cut": cut,
        }));
    } else {
        println!(
            "Max flow {} -> {}: {}",
            label(&graph, source_id),
            label(&graph, sink_id),
            flow.value
        );
        println!("Min cut:");
        for e in &flow.min_cut {
            println!(
                "  {} -> {} ({})",
                label(&graph, e.from),
                label(&graph, e.to),
                e.capacity
            );
        }
    }
    Ok(())
}

// -- Helpers --

fn resolve(graph: &Graph, index: usize) -> GraphResult<NodeId> {
    graph.node_at(index).ok_or(GraphError::IndexOutOfRange {
        index,
        len: graph.vertex_count(),
    })
}

fn label(graph: &Graph, id: NodeId) -> String {
    graph
        .value(id)
        .map(Value::to_string)
        .unwrap_or_else(|| id.to_string())
}

fn kind_label(graph: &Graph) -> String {
    format!(
        "{}, {}",
        if graph.is_oriented() { "oriented" } else { "non-oriented" },
        if graph.is_weighted() { "weighted" } else { "unweighted" }
    )
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn print_vertex_list(graph: &Graph, ids: &[NodeId], heading: &str, json: bool) {
    if json {
        let list: Vec<serde_json::Value> = ids
            .iter()
            .map(|&id| serde_json::json!({"index": graph.index_of(id), "value": graph.value(id)}))
            .collect();
        print_json(&serde_json::Value::Array(list));
    } else if ids.is_empty() {
        println!("{}: none", heading);
    } else {
        let names: Vec<String> = ids.iter().map(|&id| label(graph, id)).collect();
        println!("{}: {}", heading, names.join(", "));
    }
}

/// JSON has no infinities; encode them as strings.
fn distance_json(d: f64) -> serde_json::Value {
    if d.is_finite() {
        serde_json::json!(d)
    } else {
        serde_json::json!(format_distance(d))
    }
}

fn format_distance(d: f64) -> String {
    if d == f64::INFINITY {
        "inf".to_string()
    } else if d == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{}", d)
    }
}

fn distances_json(
    graph: &Graph,
    start: NodeId,
    rows: &[(NodeId, f64, Option<Vec<NodeId>>)],
) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = rows
        .iter()
        .map(|(id, d, path)| {
            let path: Option<Vec<String>> = path
                .as_ref()
                .map(|p| p.iter().map(|&n| label(graph, n)).collect());
            serde_json::json!({
                "vertex": graph.value(*id),
                "distance": distance_json(*d),
                "path": path,
            })
        })
        .collect();
    serde_json::json!({"start": graph.value(start), "distances": entries})
}

fn print_distances(
    graph: &Graph,
    start: NodeId,
    rows: &[(NodeId, f64, Option<Vec<NodeId>>)],
    json: bool,
) {
    if json {
        print_json(&distances_json(graph, start, rows));
        return;
    }
    println!("From {}:", label(graph, start));
    for (id, d, path) in rows {
        match path {
            Some(p) => {
                let names: Vec<String> = p.iter().map(|&n| label(graph, n)).collect();
                println!(
                    "  {}: {} via {}",
                    label(graph, *id),
                    format_distance(*d),
                    names.join(" -> ")
                );
            }
            None => println!("  {}: {}", label(graph, *id), format_distance(*d)),
        }
    }
}
