//! Client-side query engine over the immutable matchup graph.
//!
//! Everything here is pure and synchronous: the dataset is indexed once on
//! load and every output is recomputed from [`session::SessionState`].

#[cfg(test)]
pub(crate) mod fixture;
pub mod filter;
pub mod index;
pub mod load;
pub mod metrics;
pub mod neighbors;
pub mod path;
pub mod relations;
pub mod search;
pub mod session;
pub mod types;

pub use index::GraphIndex;
pub use load::parse_graph;
pub use metrics::MetricMode;
pub use path::PathStatus;
pub use session::{Explorer, ExplorerView, SessionState};
pub use types::{EdgeType, GraphData, GraphEdge, GraphNode, NodeLabel};
