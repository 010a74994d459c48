//! Error types for the graph engine.

use thiserror::Error;

use super::{EdgeId, NodeId, Value};

/// All errors that can occur in the graph engine.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Handle is not a live member of this graph.
    #[error("Vertex {0} is not a member of this graph")]
    InvalidEndpoint(NodeId),

    /// Edge record not found by ID.
    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    /// Operation is defined only for one kind of graph.
    #[error("Operation '{operation}' is only defined for {requires} graphs")]
    NotApplicable {
        operation: &'static str,
        requires: &'static str,
    },

    /// A vertex with this value already exists.
    #[error("Vertex value {0} already exists")]
    DuplicateVertex(Value),

    /// A query found no qualifying element.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No path connects the two vertices.
    #[error("Vertex {to} is unreachable from {from}")]
    Unreachable { from: NodeId, to: NodeId },

    /// Dijkstra-style search met a negative edge weight.
    #[error("Negative weight {weight} on edge {edge}")]
    NegativeWeight { edge: EdgeId, weight: f64 },

    /// Source and sink of a flow query are the same vertex.
    #[error("Flow source and sink are the same vertex {0}")]
    DegenerateFlow(NodeId),

    /// Exhaustive path enumeration hit its configured limit.
    #[error("Path enumeration budget exceeded after {explored} paths")]
    BudgetExceeded { explored: usize },

    /// Display index outside the vertex or edge listing.
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Malformed line in a text graph file.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Graph cannot be represented in the text format.
    #[error("Format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for graph engine operations.
pub type GraphResult<T> = Result<T, GraphError>;
