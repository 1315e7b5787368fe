use std::collections::HashMap;

use crate::graph::types::{EdgeType, GraphData, GraphEdge, GraphNode};
use crate::graph::ExplorerView;

use super::types::{Emphasis, Scene, SceneLink, SceneNode};

const STRONG_COLOR: &str = "#dc2626";
const WEAK_COLOR: &str = "#2563eb";
const LINK_COLOR: &str = "#94a3b8";

/// Turns a computed view into drawable nodes and links, in view order.
pub fn build_scene(view: &ExplorerView, data: &GraphData) -> Scene {
	let nodes_by_id: HashMap<&str, &GraphNode> =
		data.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
	let edges_by_id: HashMap<&str, &GraphEdge> =
		data.edges.iter().map(|e| (e.id.as_str(), e)).collect();
	let focused = view.neighbor_mode || !view.path_nodes.is_empty() || !view.search_results.is_empty();

	let nodes = view
		.visible_nodes
		.iter()
		.filter_map(|id| nodes_by_id.get(id.as_str()))
		.map(|node| SceneNode {
			id: node.id.clone(),
			name: node.display_name().to_string(),
			color: view
				.style
				.color_by_node
				.get(&node.id)
				.cloned()
				.unwrap_or_else(|| node.label.color().to_string()),
			size: view.style.size_by_node.get(&node.id).copied().unwrap_or(node.size),
			emphasis: node_emphasis(view, &node.id, focused),
			position: node.x.zip(node.y),
		})
		.collect();

	let links = view
		.visible_edges
		.iter()
		.filter_map(|id| edges_by_id.get(id.as_str()))
		.map(|edge| {
			let (color, width) = match edge.kind {
				EdgeType::StrongAgainst => (STRONG_COLOR, 2.0),
				EdgeType::WeakAgainst => (WEAK_COLOR, 1.0),
				_ => (LINK_COLOR, 1.0),
			};
			SceneLink {
				id: edge.id.clone(),
				source: edge.source.clone(),
				target: edge.target.clone(),
				color: color.to_string(),
				width,
				emphasis: link_emphasis(view, &edge.id, focused),
			}
		})
		.collect();

	Scene { nodes, links }
}

fn node_emphasis(view: &ExplorerView, id: &str, focused: bool) -> Emphasis {
	if view.selected_node.as_deref() == Some(id) {
		Emphasis::Selected
	} else if view.path_nodes.iter().any(|p| p == id) {
		Emphasis::Path
	} else if view.highlight.contains(id) {
		Emphasis::Highlight
	} else if focused {
		Emphasis::Dimmed
	} else {
		Emphasis::Normal
	}
}

fn link_emphasis(view: &ExplorerView, id: &str, focused: bool) -> Emphasis {
	if view.selected_edge.as_deref() == Some(id) {
		Emphasis::Selected
	} else if view.path_edges.iter().any(|p| p == id) {
		Emphasis::Path
	} else if view.neighbor_mode && view.neighbor_edges.contains(id) {
		Emphasis::Highlight
	} else if focused {
		Emphasis::Dimmed
	} else {
		Emphasis::Normal
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ExplorerConfig;
	use crate::graph::fixture::roster;
	use crate::graph::{Explorer, MetricMode, SessionState};

	fn scene_for(state: &SessionState) -> Scene {
		let explorer = Explorer::new(roster(), &ExplorerConfig::default());
		build_scene(&explorer.view(state), explorer.data())
	}

	fn node<'a>(scene: &'a Scene, id: &str) -> &'a SceneNode {
		scene.nodes.iter().find(|n| n.id == id).unwrap()
	}

	#[test]
	fn test_plain_scene_uses_label_colors() {
		let scene = scene_for(&SessionState::default());
		let abrams = node(&scene, "character:Abrams");
		assert_eq!(abrams.name, "Abrams");
		assert_eq!(abrams.color, "#60a5fa");
		assert_eq!(abrams.emphasis, Emphasis::Normal);
		assert!(scene.links.iter().all(|l| l.emphasis == Emphasis::Normal));
		let strong = scene.links.iter().find(|l| l.id == "m0").unwrap();
		assert_eq!(strong.color, STRONG_COLOR);
	}

	#[test]
	fn test_path_and_selection_emphasis() {
		let mut state = SessionState::default();
		state.set_path_start(Some("character:Abrams".into()));
		state.set_path_end(Some("character:Bebop".into()));
		state.select_node(Some("character:Haze".into()));
		let scene = scene_for(&state);
		assert_eq!(node(&scene, "character:Abrams").emphasis, Emphasis::Path);
		assert_eq!(node(&scene, "character:Haze").emphasis, Emphasis::Selected);
		assert_eq!(node(&scene, "mechanic:Stun").emphasis, Emphasis::Dimmed);
		let path_link = scene.links.iter().find(|l| l.id == "m0").unwrap();
		assert_eq!(path_link.emphasis, Emphasis::Path);
	}

	#[test]
	fn test_neighbor_mode_highlights_neighbors() {
		let mut state = SessionState::default();
		state.select_node(Some("character:Haze".into()));
		state.set_neighbor_mode(true);
		let scene = scene_for(&state);
		assert_eq!(node(&scene, "mechanic:Stun").emphasis, Emphasis::Highlight);
		assert_eq!(node(&scene, "character:Bebop").emphasis, Emphasis::Dimmed);
		let k0 = scene.links.iter().find(|l| l.id == "k0").unwrap();
		assert_eq!(k0.emphasis, Emphasis::Highlight);
	}

	#[test]
	fn test_metric_style_overrides_size_and_color() {
		let mut state = SessionState::default();
		state.set_metric_mode(MetricMode::OutDegree);
		let scene = scene_for(&state);
		let abrams = node(&scene, "character:Abrams");
		assert_ne!(abrams.color, "#60a5fa");
		assert!(abrams.size > 2.0);
	}

	#[test]
	fn test_same_shape_ignores_styling() {
		let plain = scene_for(&SessionState::default());
		let mut state = SessionState::default();
		state.set_metric_mode(MetricMode::OutDegree);
		assert!(plain.same_shape(&scene_for(&state)));
		state.toggle_label(crate::graph::NodeLabel::Ability);
		assert!(!plain.same_shape(&scene_for(&state)));
	}
}
