//! Fluent API for building Graph instances.

use crate::types::{GraphResult, NodeId, Value};

use super::Graph;

/// Fluent builder for constructing a [`Graph`] from vertex values.
///
/// Edges are recorded by value and resolved when [`GraphBuilder::build`]
/// runs, so vertices may be declared after the edges that use them.
pub struct GraphBuilder {
    oriented: bool,
    weighted: bool,
    vertices: Vec<Value>,
    edges: Vec<(Value, Value, f64)>,
}

impl GraphBuilder {
    /// Create a builder for a directed, unweighted graph.
    pub fn new() -> Self {
        Self {
            oriented: true,
            weighted: false,
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Create a builder with explicit flags.
    pub fn with_flags(oriented: bool, weighted: bool) -> Self {
        Self {
            oriented,
            weighted,
            ..Self::new()
        }
    }

    /// Declare a vertex. Values already declared are not duplicated.
    pub fn vertex(&mut self, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        if !self.vertices.contains(&value) {
            self.vertices.push(value);
        }
        self
    }

    /// Add an unweighted edge between two values.
    pub fn link(&mut self, from: impl Into<Value>, to: impl Into<Value>) -> &mut Self {
        self.weighted_link(from, to, 0.0)
    }

    /// Add a weighted edge between two values.
    pub fn weighted_link(
        &mut self,
        from: impl Into<Value>,
        to: impl Into<Value>,
        weight: f64,
    ) -> &mut Self {
        let from = from.into();
        let to = to.into();
        self.vertex(from.clone());
        self.vertex(to.clone());
        self.edges.push((from, to, weight));
        self
    }

    /// Build the final Graph.
    pub fn build(&self) -> GraphResult<Graph> {
        let mut graph = Graph::new(self.oriented, self.weighted);
        for value in &self.vertices {
            graph.add_vertex(value.clone());
        }
        for (from, to, weight) in &self.edges {
            let from = graph.vertex_or_insert(from.clone());
            let to = graph.vertex_or_insert(to.clone());
            graph.add_edge(from, to, *weight)?;
        }
        Ok(graph)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up a vertex by value, for tests and examples that build by value.
pub fn vertex(graph: &Graph, value: impl Into<Value>) -> Option<NodeId> {
    graph.find_vertex(&value.into())
}
