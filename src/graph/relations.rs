//! Matchup summary for a selected character and detail for a selected edge.

use super::types::{EdgeType, GraphData, GraphEdge, GraphIndexes, NodeId};

/// The three matchup columns of the relationship panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationshipSummary {
	/// Characters the selection is strong against.
	pub strong: Vec<NodeId>,
	/// Characters the selection is weak against.
	pub weak: Vec<NodeId>,
	/// Characters the selection is even against.
	pub even: Vec<NodeId>,
}

impl RelationshipSummary {
	/// Whether all three columns are empty.
	pub fn is_empty(&self) -> bool {
		self.strong.is_empty() && self.weak.is_empty() && self.even.is_empty()
	}
}

/// Matchup lists of a node, read from the precomputed indexes.
pub fn relationships_of(indexes: &GraphIndexes, id: &str) -> RelationshipSummary {
	let lookup = |map: &std::collections::HashMap<NodeId, Vec<NodeId>>| {
		map.get(id).cloned().unwrap_or_default()
	};
	RelationshipSummary {
		strong: lookup(&indexes.strong_against),
		weak: lookup(&indexes.weak_against),
		even: lookup(&indexes.even_against),
	}
}

/// What the detail drawer shows for a selected edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDetail {
	/// Edge id.
	pub id: String,
	/// Source node id.
	pub source: NodeId,
	/// Target node id.
	pub target: NodeId,
	/// Relationship type.
	pub kind: EdgeType,
	/// Free-text justification.
	pub reason: Option<String>,
	/// Evidence weight.
	pub evidence: Option<f64>,
}

impl From<&GraphEdge> for EdgeDetail {
	fn from(edge: &GraphEdge) -> Self {
		Self {
			id: edge.id.clone(),
			source: edge.source.clone(),
			target: edge.target.clone(),
			kind: edge.kind.clone(),
			reason: edge.reason().map(str::to_string),
			evidence: edge.evidence(),
		}
	}
}

/// Detail of an edge by id, if it exists.
pub fn edge_detail(data: &GraphData, id: &str) -> Option<EdgeDetail> {
	data.edge(id).map(EdgeDetail::from)
}
