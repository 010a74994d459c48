//! All data types for the graph engine.

pub mod edge;
pub mod error;
pub mod node;
pub mod value;

pub use edge::{Edge, EdgeId};
pub use error::{GraphError, GraphResult};
pub use node::NodeId;
pub use value::Value;

/// Header keyword that opens every text graph file.
pub const FORMAT_HEADER: &str = "graph";

/// Weight stored on connections of non-oriented unweighted graphs.
pub const UNWEIGHTED_EDGE_WEIGHT: f64 = 0.0;

/// Weight the algorithms use for every edge of an unweighted graph.
pub const UNIT_WEIGHT: f64 = 1.0;
