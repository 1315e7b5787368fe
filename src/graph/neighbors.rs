//! One-hop neighborhood of the selected node.

use std::collections::HashSet;

use super::types::{GraphEdge, GraphIndexes};

/// The selected node plus its precomputed neighbors. Empty unless a node is
/// selected and neighbor mode is on.
pub fn neighbor_nodes(
	indexes: &GraphIndexes,
	selected: Option<&str>,
	neighbor_mode: bool,
) -> HashSet<String> {
	let mut set = HashSet::new();
	let Some(selected) = selected.filter(|_| neighbor_mode) else {
		return set;
	};
	set.insert(selected.to_string());
	if let Some(neighbors) = indexes.neighbors.get(selected) {
		set.extend(neighbors.iter().cloned());
	}
	set
}

/// Edges with exactly one endpoint equal to the selection and the other
/// endpoint in the neighbor set.
pub fn neighbor_edges(
	edges: &[GraphEdge],
	selected: Option<&str>,
	neighbors: &HashSet<String>,
) -> HashSet<String> {
	let Some(selected) = selected else {
		return HashSet::new();
	};
	if neighbors.is_empty() {
		return HashSet::new();
	}
	edges
		.iter()
		.filter(|e| match e.other_end(selected) {
			Some(other) => other != selected && neighbors.contains(other),
			None => false,
		})
		.map(|e| e.id.clone())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::fixture::{roster, scenario};

	#[test]
	fn test_empty_without_selection_or_mode() {
		let data = scenario();
		assert!(neighbor_nodes(&data.indexes, None, true).is_empty());
		assert!(neighbor_nodes(&data.indexes, Some("character:A"), false).is_empty());
	}

	#[test]
	fn test_selection_and_neighbors() {
		let data = scenario();
		let nodes = neighbor_nodes(&data.indexes, Some("character:A"), true);
		let expected: HashSet<String> = ["character:A", "character:B", "mechanic:Barrier"]
			.iter()
			.map(|s| s.to_string())
			.collect();
		assert_eq!(nodes, expected);

		let edges = neighbor_edges(&data.edges, Some("character:A"), &nodes);
		assert_eq!(edges.len(), 2);
	}

	#[test]
	fn test_unknown_selection_is_alone() {
		let data = scenario();
		let nodes = neighbor_nodes(&data.indexes, Some("character:Ghost"), true);
		assert_eq!(nodes.len(), 1);
		assert!(neighbor_edges(&data.edges, Some("character:Ghost"), &nodes).is_empty());
	}

	#[test]
	fn test_edges_not_touching_selection_are_excluded() {
		let data = roster();
		let nodes = neighbor_nodes(&data.indexes, Some("character:Haze"), true);
		let edges = neighbor_edges(&data.edges, Some("character:Haze"), &nodes);
		let mut edges: Vec<String> = edges.into_iter().collect();
		edges.sort();
		// Dynamo-Haze and Haze-Stun; Dynamo's own edges stay out.
		assert_eq!(edges, ["k0", "m2"]);
	}
}
