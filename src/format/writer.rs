//! Writes text graph files from an in-memory graph.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use crate::graph::Graph;
use crate::types::error::{GraphError, GraphResult};
use crate::types::{NodeId, Value, FORMAT_HEADER};

use super::{DIRECTED, EDGE, UNDIRECTED, UNWEIGHTED, VERTEX, WEIGHTED};

/// Writer for text graph files.
pub struct GraphWriter;

impl GraphWriter {
    /// Write a complete Graph to a file.
    pub fn write_to_file(graph: &Graph, path: &Path) -> GraphResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        Self::write_to(graph, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a complete Graph to any writer.
    ///
    /// Every vertex is listed, isolated ones included, followed by one
    /// `edge` line per logical connection. Vertex values must be single
    /// tokens; duplicates are written but merge into one vertex on load.
    pub fn write_to(graph: &Graph, writer: &mut impl Write) -> GraphResult<()> {
        let direction = if graph.is_oriented() { DIRECTED } else { UNDIRECTED };
        let weighting = if graph.is_weighted() { WEIGHTED } else { UNWEIGHTED };
        writeln!(writer, "{} {} {}", FORMAT_HEADER, direction, weighting)?;

        let mut seen: HashSet<String> = HashSet::new();
        for &id in graph.nodes() {
            let token = token_for(graph, id)?;
            if !seen.insert(token.clone()) {
                log::warn!(
                    "Vertex value `{}` appears more than once; it will load as one vertex",
                    token
                );
            }
            writeln!(writer, "{} {}", VERTEX, token)?;
        }

        let connections = graph.connections();
        for edge in &connections {
            let from = token_for(graph, edge.from)?;
            let to = token_for(graph, edge.to)?;
            if graph.is_weighted() {
                writeln!(writer, "{} {} {} {}", EDGE, from, to, edge.weight)?;
            } else {
                writeln!(writer, "{} {} {}", EDGE, from, to)?;
            }
        }

        log::debug!(
            "Wrote graph with {} vertices and {} connections",
            graph.vertex_count(),
            connections.len()
        );
        Ok(())
    }

    /// Render a graph to a string.
    pub fn write_string(graph: &Graph) -> GraphResult<String> {
        let mut buf = Vec::new();
        Self::write_to(graph, &mut buf)?;
        String::from_utf8(buf).map_err(|e| GraphError::Format(e.to_string()))
    }
}

fn token_for(graph: &Graph, id: NodeId) -> GraphResult<String> {
    let value: &Value = graph.value(id).ok_or(GraphError::InvalidEndpoint(id))?;
    if !value.is_token() {
        return Err(GraphError::Format(format!(
            "vertex {} value {:?} would not read back as the same value",
            id,
            value.to_string()
        )));
    }
    Ok(value.to_string())
}
