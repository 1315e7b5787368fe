pub mod force_graph;
pub mod panel;
