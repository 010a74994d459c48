//! Plain-text graph file I/O.
//!
//! ```text
//! # comments and blank lines are ignored
//! graph directed weighted
//! vertex A
//! vertex B
//! edge A B 2.5
//! ```
//!
//! The header must come first. Values are single whitespace-free tokens,
//! type-sniffed with [`crate::types::Value::parse`]. An `edge` line is one
//! logical connection: non-oriented graphs mirror it on load.

pub mod reader;
pub mod writer;

pub use reader::GraphReader;
pub use writer::GraphWriter;

pub(crate) const DIRECTED: &str = "directed";
pub(crate) const UNDIRECTED: &str = "undirected";
pub(crate) const WEIGHTED: &str = "weighted";
pub(crate) const UNWEIGHTED: &str = "unweighted";
pub(crate) const VERTEX: &str = "vertex";
pub(crate) const EDGE: &str = "edge";
