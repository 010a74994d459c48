//! Reads text graph files into an in-memory graph.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::graph::Graph;
use crate::types::error::{GraphError, GraphResult};
use crate::types::{Value, FORMAT_HEADER};

use super::{DIRECTED, EDGE, UNDIRECTED, UNWEIGHTED, VERTEX, WEIGHTED};

/// Reader for text graph files.
pub struct GraphReader;

impl GraphReader {
    /// Read a graph file into a Graph.
    pub fn read_from_file(path: &Path) -> GraphResult<Graph> {
        let file = std::fs::File::open(path)?;
        Self::read_from(&mut BufReader::new(file))
    }

    /// Read from any reader into a Graph.
    pub fn read_from(reader: &mut impl Read) -> GraphResult<Graph> {
        let mut graph: Option<Graph> = None;

        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let tokens: Vec<&str> = trimmed.split_whitespace().collect();

            let current = match graph.as_mut() {
                Some(current) => current,
                None => {
                    graph = Some(parse_header(&tokens, line_no)?);
                    continue;
                }
            };

            match tokens[0] {
                VERTEX => {
                    let [_, value] = tokens[..] else {
                        return Err(parse_error(line_no, "expected `vertex <value>`"));
                    };
                    current.vertex_or_insert(Value::parse(value));
                }
                EDGE => parse_edge(current, &tokens, line_no)?,
                other => {
                    return Err(parse_error(
                        line_no,
                        format!("unknown directive `{}`", other),
                    ))
                }
            }
        }

        let graph = graph.ok_or_else(|| parse_error(0, "missing `graph` header"))?;
        log::debug!(
            "Loaded graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Parse a graph from a string.
    pub fn read_str(text: &str) -> GraphResult<Graph> {
        Self::read_from(&mut text.as_bytes())
    }
}

fn parse_header(tokens: &[&str], line_no: usize) -> GraphResult<Graph> {
    let [keyword, direction, weighting] = tokens[..] else {
        return Err(parse_error(
            line_no,
            "expected `graph <directed|undirected> <weighted|unweighted>`",
        ));
    };
    if keyword != FORMAT_HEADER {
        return Err(parse_error(line_no, "file must start with a `graph` header"));
    }
    let oriented = match direction {
        DIRECTED => true,
        UNDIRECTED => false,
        other => {
            return Err(parse_error(
                line_no,
                format!("unknown direction `{}`", other),
            ))
        }
    };
    let weighted = match weighting {
        WEIGHTED => true,
        UNWEIGHTED => false,
        other => {
            return Err(parse_error(
                line_no,
                format!("unknown weighting `{}`", other),
            ))
        }
    };
    Ok(Graph::new(oriented, weighted))
}

fn parse_edge(graph: &mut Graph, tokens: &[&str], line_no: usize) -> GraphResult<()> {
    let (from, to, weight) = match tokens[..] {
        [_, from, to] => (from, to, None),
        [_, from, to, weight] => (from, to, Some(weight)),
        _ => {
            return Err(parse_error(
                line_no,
                "expected `edge <from> <to> [weight]`",
            ))
        }
    };

    let weight = match (graph.is_weighted(), weight) {
        (true, None) => return Err(parse_error(line_no, "weighted graph edge needs a weight")),
        (true, Some(w)) => w
            .parse::<f64>()
            .map_err(|_| parse_error(line_no, format!("invalid weight `{}`", w)))?,
        (false, _) => 0.0,
    };

    let from = graph.vertex_or_insert(Value::parse(from));
    let to = graph.vertex_or_insert(Value::parse(to));
    graph.add_edge(from, to, weight)?;
    Ok(())
}

fn parse_error(line: usize, message: impl Into<String>) -> GraphError {
    GraphError::Parse {
        line,
        message: message.into(),
    }
}
