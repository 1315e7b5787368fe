//! Facet filtering: labels, archetypes, relationship types and mechanics.
//!
//! An empty label set hides every node. The archetype and relationship facets
//! are inactive when empty. The selected edge always stays visible through
//! the edge facets; its endpoint nodes are NOT pinned, so a selected edge
//! whose endpoints are filtered out still disappears. Pinning endpoints is
//! left to the caller.

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use super::types::{EdgeType, GraphData, GraphEdge, GraphNode, NodeLabel};

/// Node-side facet state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeFacets {
	/// Labels to show. Empty shows nothing.
	pub labels: HashSet<NodeLabel>,
	/// Character archetypes to show. Empty disables the facet.
	pub archetypes: HashSet<String>,
	/// Mechanic name to focus on.
	pub mechanic: Option<String>,
}

impl Default for NodeFacets {
	fn default() -> Self {
		Self {
			labels: NodeLabel::ALL.into_iter().collect(),
			archetypes: HashSet::new(),
			mechanic: None,
		}
	}
}

/// Edge-side facet state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeFacets {
	/// Matchup types to show. Empty disables the facet.
	pub relationships: HashSet<EdgeType>,
	/// Mechanic name to focus on.
	pub mechanic: Option<String>,
	/// Currently selected edge, exempt from facet exclusion.
	pub selected_edge: Option<String>,
}

fn character_touches_mechanic(node: &GraphNode, mechanic: &str) -> bool {
	node.list("mechanics_used").iter().any(|m| m == mechanic)
		|| node.list("mechanics_countered").iter().any(|m| m == mechanic)
}

/// Whether a single node passes every node facet.
pub fn node_passes(node: &GraphNode, facets: &NodeFacets) -> bool {
	if !facets.labels.contains(&node.label) {
		return false;
	}
	if !facets.archetypes.is_empty() && node.label == NodeLabel::Character {
		match node.archetype() {
			Some(a) if facets.archetypes.contains(a) => {}
			_ => return false,
		}
	}
	if let Some(mechanic) = facets.mechanic.as_deref() {
		match node.label {
			NodeLabel::Mechanic if node.name() != Some(mechanic) => return false,
			NodeLabel::Character if !character_touches_mechanic(node, mechanic) => return false,
			_ => {}
		}
	}
	true
}

/// Nodes passing the node facets, in dataset order.
pub fn filter_nodes<'a>(nodes: &'a [GraphNode], facets: &NodeFacets) -> Vec<&'a GraphNode> {
	nodes.iter().filter(|n| node_passes(n, facets)).collect()
}

/// Whether a single edge passes the edge facets given the visible node ids.
pub fn edge_passes(edge: &GraphEdge, visible: &HashSet<&str>, facets: &EdgeFacets) -> bool {
	if !visible.contains(edge.source.as_str()) || !visible.contains(edge.target.as_str()) {
		return false;
	}
	let selected = facets.selected_edge.as_deref() == Some(edge.id.as_str());
	if edge.kind.is_matchup()
		&& !facets.relationships.is_empty()
		&& !facets.relationships.contains(&edge.kind)
		&& !selected
	{
		return false;
	}
	if let Some(mechanic) = facets.mechanic.as_deref() {
		if edge.kind.is_mechanic_link()
			&& !edge.target.ends_with(&format!(":{mechanic}"))
			&& !selected
		{
			return false;
		}
	}
	true
}

/// Edges passing the edge facets, in dataset order.
pub fn filter_edges<'a>(
	edges: &'a [GraphEdge],
	visible: &HashSet<&str>,
	facets: &EdgeFacets,
) -> Vec<&'a GraphEdge> {
	edges
		.iter()
		.filter(|e| edge_passes(e, visible, facets))
		.collect()
}

/// Option lists for the facet panel, each sorted ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetOptions {
	/// Labels present in `meta.label_distribution`.
	pub labels: Vec<String>,
	/// Archetypes present in `meta.archetype_counts`.
	pub archetypes: Vec<String>,
	/// Names of Mechanic nodes.
	pub mechanics: Vec<String>,
}

impl FacetOptions {
	/// Derives the option lists from a dataset.
	pub fn from_data(data: &GraphData) -> Self {
		let sorted = |keys: Vec<String>| -> Vec<String> {
			keys.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
		};
		Self {
			labels: sorted(data.meta.label_distribution.keys().cloned().collect()),
			archetypes: sorted(data.meta.archetype_counts.keys().cloned().collect()),
			mechanics: sorted(
				data.nodes
					.iter()
					.filter(|n| n.label == NodeLabel::Mechanic)
					.filter_map(|n| n.name().map(str::to_string))
					.collect(),
			),
		}
	}
}

/// Adds `value` if absent, removes it if present.
pub fn toggle_in_set<T: Eq + Hash>(set: &mut HashSet<T>, value: T) {
	if !set.remove(&value) {
		set.insert(value);
	}
}
