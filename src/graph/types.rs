//! Serde model of the `graph.json` snapshot.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Node and edge identifiers as they appear in the dataset.
pub type NodeId = String;
/// Edge identifier.
pub type EdgeId = String;

/// Ordered property bag attached to nodes and edges.
pub type Properties = IndexMap<String, PropertyValue>;

/// Label of a node. The pipeline only emits these four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeLabel {
	/// A playable character.
	Character,
	/// An ability owned by a character.
	Ability,
	/// A gameplay mechanic used or countered by abilities.
	Mechanic,
	/// A character archetype.
	Archetype,
}

impl NodeLabel {
	/// Every label, in display order.
	pub const ALL: [NodeLabel; 4] = [
		NodeLabel::Character,
		NodeLabel::Ability,
		NodeLabel::Mechanic,
		NodeLabel::Archetype,
	];

	/// Name used in the dataset and the facet panel.
	pub fn as_str(&self) -> &'static str {
		match self {
			NodeLabel::Character => "Character",
			NodeLabel::Ability => "Ability",
			NodeLabel::Mechanic => "Mechanic",
			NodeLabel::Archetype => "Archetype",
		}
	}

	/// Default fill color when no metric overrides it.
	pub fn color(&self) -> &'static str {
		match self {
			NodeLabel::Character => "#60a5fa",
			NodeLabel::Ability => "#fbbf24",
			NodeLabel::Mechanic => "#34d399",
			NodeLabel::Archetype => "#c084fc",
		}
	}

	/// Parses a dataset label name.
	pub fn parse(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|l| l.as_str() == name)
	}
}

impl fmt::Display for NodeLabel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Relationship type of an edge.
///
/// Unknown types are preserved so a newer pipeline does not break loading.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeType {
	/// Source counters target.
	StrongAgainst,
	/// Source is countered by target.
	WeakAgainst,
	/// Neither side has an edge. Semantically undirected.
	EvenAgainst,
	/// Ability uses a mechanic.
	UsesMechanic,
	/// Ability counters a mechanic.
	CountersMechanic,
	/// Character counters a mechanic through one of its abilities.
	CharacterCountersMechanic,
	/// Character owns an ability.
	HasAbility,
	/// Character belongs to an archetype.
	IsArchetype,
	/// Any relation type this build does not know about.
	Other(String),
}

impl EdgeType {
	/// The three character-vs-character matchup types.
	pub const MATCHUPS: [EdgeType; 3] = [
		EdgeType::StrongAgainst,
		EdgeType::WeakAgainst,
		EdgeType::EvenAgainst,
	];

	/// Name used in the dataset.
	pub fn as_str(&self) -> &str {
		match self {
			EdgeType::StrongAgainst => "STRONG_AGAINST",
			EdgeType::WeakAgainst => "WEAK_AGAINST",
			EdgeType::EvenAgainst => "EVEN_AGAINST",
			EdgeType::UsesMechanic => "USES_MECHANIC",
			EdgeType::CountersMechanic => "COUNTERS_MECHANIC",
			EdgeType::CharacterCountersMechanic => "CHARACTER_COUNTERS_MECHANIC",
			EdgeType::HasAbility => "HAS_ABILITY",
			EdgeType::IsArchetype => "IS_ARCHETYPE",
			EdgeType::Other(name) => name,
		}
	}

	/// Whether this is a STRONG/WEAK/EVEN matchup relation.
	pub fn is_matchup(&self) -> bool {
		matches!(
			self,
			EdgeType::StrongAgainst | EdgeType::WeakAgainst | EdgeType::EvenAgainst
		)
	}

	/// Whether the edge points at a mechanic node and is subject to the mechanic facet.
	pub fn is_mechanic_link(&self) -> bool {
		matches!(
			self,
			EdgeType::UsesMechanic | EdgeType::CharacterCountersMechanic
		)
	}
}

impl From<String> for EdgeType {
	fn from(name: String) -> Self {
		match name.as_str() {
			"STRONG_AGAINST" => EdgeType::StrongAgainst,
			"WEAK_AGAINST" => EdgeType::WeakAgainst,
			"EVEN_AGAINST" => EdgeType::EvenAgainst,
			"USES_MECHANIC" => EdgeType::UsesMechanic,
			"COUNTERS_MECHANIC" => EdgeType::CountersMechanic,
			"CHARACTER_COUNTERS_MECHANIC" => EdgeType::CharacterCountersMechanic,
			"HAS_ABILITY" => EdgeType::HasAbility,
			"IS_ARCHETYPE" => EdgeType::IsArchetype,
			_ => EdgeType::Other(name),
		}
	}
}

impl From<EdgeType> for String {
	fn from(kind: EdgeType) -> Self {
		kind.as_str().to_string()
	}
}

impl fmt::Display for EdgeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single property value. Lists of strings get their own variant since
/// the facet engine reads `mechanics_used` / `mechanics_countered`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
	/// JSON null.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Numeric scalar.
	Number(f64),
	/// String scalar.
	Text(String),
	/// List of strings.
	List(Vec<String>),
	/// Anything else (nested objects, mixed lists).
	Other(serde_json::Value),
}

impl PropertyValue {
	/// String content, if this is a string.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			PropertyValue::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Numeric content. Numeric strings are accepted.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			PropertyValue::Number(n) => Some(*n),
			PropertyValue::Text(s) => s.trim().parse().ok(),
			_ => None,
		}
	}

	/// String list content.
	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			PropertyValue::List(items) => Some(items),
			_ => None,
		}
	}
}

/// A node of the dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Stable id, `<label-lowercase>:<name>`.
	pub id: NodeId,
	/// Node label.
	pub label: NodeLabel,
	/// Arbitrary properties.
	#[serde(default)]
	pub properties: Properties,
	/// Base render size.
	#[serde(default = "default_node_size")]
	pub size: f64,
	/// Layout hint from the pipeline.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	/// Layout hint from the pipeline.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
}

/// Base size used when a node carries none.
pub const DEFAULT_NODE_SIZE: f64 = 1.5;

fn default_node_size() -> f64 {
	DEFAULT_NODE_SIZE
}

impl GraphNode {
	/// String property lookup. Missing or non-string values yield `None`.
	pub fn text(&self, key: &str) -> Option<&str> {
		self.properties.get(key).and_then(PropertyValue::as_text)
	}

	/// String-list property lookup. Missing or mistyped values yield an empty slice.
	pub fn list(&self, key: &str) -> &[String] {
		self.properties
			.get(key)
			.and_then(PropertyValue::as_list)
			.unwrap_or(&[])
	}

	/// `name` property.
	pub fn name(&self) -> Option<&str> {
		self.text("name")
	}

	/// `archetype` property (Character nodes).
	pub fn archetype(&self) -> Option<&str> {
		self.text("archetype")
	}

	/// Human-readable name, falling back to the id.
	pub fn display_name(&self) -> &str {
		self.name().unwrap_or(&self.id)
	}
}

/// An edge of the dataset. Stored directed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Unique edge id.
	pub id: EdgeId,
	/// Source node id.
	pub source: NodeId,
	/// Target node id.
	pub target: NodeId,
	/// Relationship type.
	#[serde(rename = "type")]
	pub kind: EdgeType,
	/// Arbitrary properties such as `reason` and `evidence`.
	#[serde(default)]
	pub properties: Properties,
}

impl GraphEdge {
	/// Free-text justification of a matchup.
	pub fn reason(&self) -> Option<&str> {
		self.properties
			.get("reason")
			.and_then(PropertyValue::as_text)
			.filter(|r| !r.is_empty())
	}

	/// Evidence weight, stored either as a number or as a numeric string.
	pub fn evidence(&self) -> Option<f64> {
		self.properties
			.get("evidence")
			.and_then(PropertyValue::as_number)
	}

	/// Whether `id` is one of the two endpoints.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// The endpoint opposite `id`, if `id` is an endpoint.
	pub fn other_end(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// Aggregate counts computed upstream. Trusted as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMeta {
	/// Generation timestamp (ISO 8601).
	#[serde(default)]
	pub generated_at: String,
	/// Number of nodes in the document.
	pub node_count: usize,
	/// Number of edges in the document.
	pub edge_count: usize,
	/// Node count per label.
	#[serde(default)]
	pub label_distribution: HashMap<String, u64>,
	/// Character count per archetype.
	#[serde(default)]
	pub archetype_counts: HashMap<String, u64>,
	/// Mechanic count per category.
	#[serde(default)]
	pub mechanic_category_counts: HashMap<String, u64>,
}

/// Indexes precomputed by the pipeline. Consumed, never recomputed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphIndexes {
	/// In-degree per node.
	pub degrees_in: HashMap<NodeId, u64>,
	/// Out-degree per node.
	pub degrees_out: HashMap<NodeId, u64>,
	/// Undirected neighbors per node.
	pub neighbors: HashMap<NodeId, Vec<NodeId>>,
	/// Characters each character is strong against.
	pub strong_against: HashMap<NodeId, Vec<NodeId>>,
	/// Characters each character is weak against.
	pub weak_against: HashMap<NodeId, Vec<NodeId>>,
	/// Characters each character is even against.
	pub even_against: HashMap<NodeId, Vec<NodeId>>,
	/// Number of characters using each mechanic.
	pub mechanic_usage: HashMap<String, u64>,
	/// Number of characters countering each mechanic.
	pub mechanic_counter: HashMap<String, u64>,
}

/// The whole `graph.json` document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Aggregate counts.
	pub meta: GraphMeta,
	/// All nodes.
	pub nodes: Vec<GraphNode>,
	/// All edges.
	pub edges: Vec<GraphEdge>,
	/// Precomputed indexes.
	#[serde(default)]
	pub indexes: GraphIndexes,
}

impl GraphData {
	/// Linear node lookup by id. Returns the last node with that id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().rev().find(|n| n.id == id)
	}

	/// Linear edge lookup by id.
	pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
		self.edges.iter().find(|e| e.id == id)
	}
}
