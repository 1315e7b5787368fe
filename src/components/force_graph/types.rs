/// How strongly a node or link is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emphasis {
	#[default]
	Normal,
	/// Pushed to the background by a search, path or neighbor focus.
	Dimmed,
	/// Search hit, or a link into the neighbor set.
	Highlight,
	/// Part of the current shortest path.
	Path,
	/// The selected node or edge.
	Selected,
}

impl Emphasis {
	pub fn alpha(self) -> f64 {
		match self {
			Emphasis::Dimmed => 0.15,
			Emphasis::Normal => 0.7,
			_ => 1.0,
		}
	}

	/// Labels are drawn for anything the user is looking at.
	pub fn shows_label(self) -> bool {
		matches!(self, Emphasis::Highlight | Emphasis::Path | Emphasis::Selected)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: String,
	pub name: String,
	pub color: String,
	pub size: f64,
	pub emphasis: Emphasis,
	/// Layout hint from the dataset.
	pub position: Option<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLink {
	pub id: String,
	pub source: String,
	pub target: String,
	pub color: String,
	pub width: f64,
	pub emphasis: Emphasis,
}

/// What the canvas should draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: Vec<SceneNode>,
	pub links: Vec<SceneLink>,
}

impl Scene {
	/// Whether `other` has the same nodes and links, ignoring styling.
	pub fn same_shape(&self, other: &Scene) -> bool {
		self.nodes.len() == other.nodes.len()
			&& self.links.len() == other.links.len()
			&& self.nodes.iter().zip(&other.nodes).all(|(a, b)| a.id == b.id)
			&& self.links.iter().zip(&other.links).all(|(a, b)| a.id == b.id)
	}
}

/// A click on the canvas that did not turn into a drag or pan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanvasEvent {
	Node(String),
	Edge(String),
	Background,
}
