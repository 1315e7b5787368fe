use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::types::{Emphasis, Scene, SceneLink};

/// World-space radius of a node with size 1.
pub const NODE_RADIUS: f64 = 4.0;
/// Screen-space tolerance for clicking a link.
pub const LINK_HIT_PX: f64 = 5.0;
/// Dataset coordinates are unit-scale; this spreads them over the canvas.
const POSITION_SCALE: f64 = 300.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub name: String,
	pub color: String,
	pub radius: f64,
	pub emphasis: Emphasis,
}

#[derive(Clone, Debug, Default)]
pub struct LinkInfo {
	pub id: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What lies under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
	Node(DefaultNodeIdx),
	Link(String),
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, LinkInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	/// Total cursor travel since the last mousedown, to tell clicks from drags.
	pub pointer_travel: f64,
	scene: Scene,
	links: HashMap<String, SceneLink>,
}

fn simulation() -> ForceGraph<NodeInfo, LinkInfo> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(scene: &Scene, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			pointer_travel: 0.0,
			scene: Scene::default(),
			links: HashMap::new(),
		};
		state.rebuild(scene);
		state
	}

	/// Applies a new scene. Styling changes are patched in place; a change in
	/// the visible nodes or links rebuilds the simulation, keeping the
	/// positions of nodes that stay on screen.
	pub fn sync(&mut self, scene: &Scene) {
		if self.scene.same_shape(scene) {
			self.restyle(scene);
		} else {
			self.rebuild(scene);
		}
	}

	fn restyle(&mut self, scene: &Scene) {
		let nodes: HashMap<&str, _> = scene.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
		self.graph.visit_nodes_mut(|node| {
			if let Some(styled) = nodes.get(node.data.user_data.id.as_str()) {
				let info = &mut node.data.user_data;
				info.color = styled.color.clone();
				info.radius = NODE_RADIUS * styled.size;
				info.emphasis = styled.emphasis;
			}
		});
		self.links = scene.links.iter().map(|l| (l.id.clone(), l.clone())).collect();
		self.scene = scene.clone();
	}

	fn rebuild(&mut self, scene: &Scene) {
		let mut previous = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});

		let mut graph = simulation();
		let mut id_to_idx = HashMap::new();
		let count = scene.nodes.len().max(1) as f64;
		for (i, node) in scene.nodes.iter().enumerate() {
			let (x, y, is_anchor) = previous.get(&node.id).copied().unwrap_or_else(|| {
				let (x, y) = node
					.position
					.map(|(x, y)| (x * POSITION_SCALE, y * POSITION_SCALE))
					.unwrap_or_else(|| {
						let angle = (i as f64) * 2.0 * PI / count;
						(100.0 * angle.cos(), 100.0 * angle.sin())
					});
				(x as f32, y as f32, false)
			});
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeInfo {
					id: node.id.clone(),
					name: node.name.clone(),
					color: node.color.clone(),
					radius: NODE_RADIUS * node.size,
					emphasis: node.emphasis,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for link in &scene.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: LinkInfo {
							id: link.id.clone(),
						},
					},
				);
			}
		}

		debug!(
			"canvas rebuilt with {} nodes, {} links",
			scene.nodes.len(),
			scene.links.len()
		);
		self.graph = graph;
		self.hovered = None;
		self.drag = DragState::default();
		self.links = scene.links.iter().map(|l| (l.id.clone(), l.clone())).collect();
		self.scene = scene.clone();
	}

	/// Styling of a drawn link.
	pub fn link(&self, id: &str) -> Option<&SceneLink> {
		self.links.get(id)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// Small nodes stay clickable.
			let radius = node.data.user_data.radius.max(NODE_RADIUS * 1.5);
			if (dx * dx + dy * dy).sqrt() < radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn link_at_position(&self, sx: f64, sy: f64) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let tolerance = LINK_HIT_PX / self.transform.k;
		let mut best: Option<(f64, String)> = None;
		self.graph.visit_edges(|n1, n2, edge| {
			let d = segment_distance(
				(gx, gy),
				(n1.x() as f64, n1.y() as f64),
				(n2.x() as f64, n2.y() as f64),
			);
			if d < tolerance && best.as_ref().is_none_or(|(b, _)| d < *b) {
				best = Some((d, edge.user_data.id.clone()));
			}
		});
		best.map(|(_, id)| id)
	}

	/// Nodes win over links.
	pub fn hit(&self, sx: f64, sy: f64) -> Option<Hit> {
		self.node_at_position(sx, sy)
			.map(Hit::Node)
			.or_else(|| self.link_at_position(sx, sy).map(Hit::Link))
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
