//! Deduplicated undirected adjacency used for pathfinding and lookups.
//!
//! Built once per dataset from the raw node and edge lists:
//!
//! - Nodes are added once. A repeated id keeps its original slot (last write
//!   wins, but the index only stores ids so nothing observable changes).
//! - Edges whose endpoints are not both known nodes are dropped.
//! - Only the first edge per unordered endpoint pair is kept, whatever its id
//!   or type. Multi-edges between two nodes collapse into one traversal edge,
//!   which keeps shortest paths independent of duplicated relations.
//! - Self-loops never help a traversal and are dropped.

use std::collections::{HashMap, HashSet};

use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};

use super::types::{EdgeId, GraphEdge, GraphNode, NodeId};

/// Unordered pair key `min|max` used to collapse multi-edges.
pub fn pair_key(a: &str, b: &str) -> String {
	if a <= b {
		format!("{a}|{b}")
	} else {
		format!("{b}|{a}")
	}
}

/// Immutable adjacency over the undirected projection of the graph.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
	graph: UnGraph<NodeId, EdgeId>,
	node_map: HashMap<NodeId, NodeIndex>,
	edge_map: HashMap<EdgeId, EdgeIndex>,
	pairs: HashSet<String>,
	adjacency: Vec<Vec<NodeIndex>>,
}

impl GraphIndex {
	/// Builds the index. Never fails; anomalies are dropped as documented above.
	pub fn build(nodes: &[GraphNode], edges: &[GraphEdge]) -> Self {
		let mut graph = UnGraph::with_capacity(nodes.len(), edges.len());
		let mut node_map = HashMap::with_capacity(nodes.len());
		let mut edge_map = HashMap::with_capacity(edges.len());
		let mut pairs = HashSet::with_capacity(edges.len());

		let mut duplicate_nodes = 0usize;
		for node in nodes {
			if node_map.contains_key(&node.id) {
				duplicate_nodes += 1;
				continue;
			}
			let idx = graph.add_node(node.id.clone());
			node_map.insert(node.id.clone(), idx);
		}

		let (mut dangling, mut collapsed) = (0usize, 0usize);
		for edge in edges {
			let (Some(&s), Some(&t)) = (node_map.get(&edge.source), node_map.get(&edge.target))
			else {
				dangling += 1;
				continue;
			};
			if s == t || edge_map.contains_key(&edge.id) {
				collapsed += 1;
				continue;
			}
			if !pairs.insert(pair_key(&edge.source, &edge.target)) {
				collapsed += 1;
				continue;
			}
			let idx = graph.add_edge(s, t, edge.id.clone());
			edge_map.insert(edge.id.clone(), idx);
		}

		// Edge indices grow with insertion, so this keeps neighbor order stable.
		let mut adjacency = vec![Vec::new(); graph.node_count()];
		for idx in graph.edge_indices() {
			if let Some((a, b)) = graph.edge_endpoints(idx) {
				adjacency[a.index()].push(b);
				adjacency[b.index()].push(a);
			}
		}

		debug!(
			"graph index: {} nodes, {} traversal edges ({} duplicate nodes, {} dangling edges, {} collapsed edges)",
			graph.node_count(),
			graph.edge_count(),
			duplicate_nodes,
			dangling,
			collapsed
		);

		Self {
			graph,
			node_map,
			edge_map,
			pairs,
			adjacency,
		}
	}

	/// Whether a node with this id was indexed.
	pub fn has_node(&self, id: &str) -> bool {
		self.node_map.contains_key(id)
	}

	/// Whether this edge id survived deduplication.
	pub fn has_edge(&self, id: &str) -> bool {
		self.edge_map.contains_key(id)
	}

	/// Neighbors of a node in traversal-edge insertion order. Unknown ids
	/// have no neighbors.
	pub fn neighbors_of(&self, id: &str) -> Vec<NodeId> {
		let Some(&idx) = self.node_map.get(id) else {
			return Vec::new();
		};
		self.adjacent(idx)
			.iter()
			.map(|&n| self.graph[n].clone())
			.collect()
	}

	/// The traversal edge connecting two nodes, in either direction.
	pub fn edge_between(&self, a: &str, b: &str) -> Option<&EdgeId> {
		let (&s, &t) = (self.node_map.get(a)?, self.node_map.get(b)?);
		let idx = self.graph.find_edge(s, t)?;
		self.graph.edge_weight(idx)
	}

	/// Number of indexed nodes.
	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	/// Number of traversal edges.
	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	/// Unordered endpoint pairs that have a traversal edge.
	pub fn retained_pairs(&self) -> &HashSet<String> {
		&self.pairs
	}

	pub(crate) fn node_index(&self, id: &str) -> Option<NodeIndex> {
		self.node_map.get(id).copied()
	}

	pub(crate) fn node_id(&self, idx: NodeIndex) -> Option<&NodeId> {
		self.graph.node_weight(idx)
	}

	pub(crate) fn adjacent(&self, idx: NodeIndex) -> &[NodeIndex] {
		self.adjacency
			.get(idx.index())
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::fixture::{edge, node, scenario};
	use crate::graph::types::{EdgeType, NodeLabel};

	#[test]
	fn test_pair_key_is_unordered() {
		assert_eq!(pair_key("b", "a"), "a|b");
		assert_eq!(pair_key("a", "b"), "a|b");
	}

	#[test]
	fn test_build_scenario() {
		let data = scenario();
		let index = GraphIndex::build(&data.nodes, &data.edges);
		assert_eq!(index.node_count(), 3);
		assert_eq!(index.edge_count(), 2);
		assert!(index.has_node("character:A"));
		assert!(!index.has_node("character:Z"));
		assert!(index.has_edge("edge:A-uses-Barrier"));
		assert_eq!(
			index.neighbors_of("character:A"),
			vec!["mechanic:Barrier".to_string(), "character:B".to_string()]
		);
		assert_eq!(
			index.edge_between("character:B", "character:A").map(String::as_str),
			Some("edge:A-strong-B")
		);
		assert_eq!(index.edge_between("character:B", "mechanic:Barrier"), None);
	}

	#[test]
	fn test_multi_edges_collapse_to_first_seen() {
		let nodes = vec![
			node("character:A", NodeLabel::Character),
			node("character:B", NodeLabel::Character),
		];
		let edges = vec![
			edge("e1", "character:A", "character:B", EdgeType::EvenAgainst),
			edge("e2", "character:B", "character:A", EdgeType::EvenAgainst),
			edge("e3", "character:A", "character:B", EdgeType::StrongAgainst),
		];
		let index = GraphIndex::build(&nodes, &edges);
		assert_eq!(index.edge_count(), 1);
		assert!(index.has_edge("e1"));
		assert!(!index.has_edge("e2"));
		assert!(!index.has_edge("e3"));
		assert_eq!(index.neighbors_of("character:B"), vec!["character:A".to_string()]);
	}

	#[test]
	fn test_dangling_edges_and_duplicate_nodes_are_tolerated() {
		let nodes = vec![
			node("character:A", NodeLabel::Character),
			node("character:A", NodeLabel::Character),
			node("character:B", NodeLabel::Character),
		];
		let edges = vec![
			edge("e1", "character:A", "character:Ghost", EdgeType::StrongAgainst),
			edge("e2", "character:A", "character:A", EdgeType::EvenAgainst),
			edge("e3", "character:A", "character:B", EdgeType::WeakAgainst),
		];
		let index = GraphIndex::build(&nodes, &edges);
		assert_eq!(index.node_count(), 2);
		assert_eq!(index.edge_count(), 1);
		assert!(!index.has_edge("e1"));
		assert!(!index.has_edge("e2"));
		assert!(index.neighbors_of("character:Ghost").is_empty());
	}
}
