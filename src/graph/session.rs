//! Session state and the dispatcher that derives every output from it.
//!
//! [`SessionState`] is the only mutable state. Its methods are the single
//! writer; [`Explorer::view`] is a pure function of the loaded dataset and a
//! state snapshot, so the UI can re-run it on every transition.

use std::collections::HashSet;

use log::debug;

use super::filter::{self, EdgeFacets, FacetOptions, NodeFacets};
use super::index::GraphIndex;
use super::metrics::{self, MetricMode, MetricStyle, Rankings};
use super::neighbors;
use super::path::{self, PathStatus};
use super::relations::{self, EdgeDetail, RelationshipSummary};
use super::search::SearchIndex;
use super::types::{EdgeId, EdgeType, GraphData, GraphEdge, GraphNode, NodeId, NodeLabel};
use crate::config::ExplorerConfig;

/// Selection and filter state of one explorer session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
	search_term: String,
	active_labels: HashSet<NodeLabel>,
	active_archetypes: HashSet<String>,
	relationship_filters: HashSet<EdgeType>,
	mechanic_filter: Option<String>,
	selected_node: Option<NodeId>,
	selected_edge: Option<EdgeId>,
	neighbor_mode: bool,
	path_start: Option<NodeId>,
	path_end: Option<NodeId>,
	metric_mode: MetricMode,
	default_labels: HashSet<NodeLabel>,
}

impl Default for SessionState {
	fn default() -> Self {
		Self::with_labels(NodeLabel::ALL)
	}
}

impl SessionState {
	/// A fresh session whose label facet starts (and resets) to `labels`.
	pub fn with_labels(labels: impl IntoIterator<Item = NodeLabel>) -> Self {
		let default_labels: HashSet<NodeLabel> = labels.into_iter().collect();
		Self {
			search_term: String::new(),
			active_labels: default_labels.clone(),
			active_archetypes: HashSet::new(),
			relationship_filters: HashSet::new(),
			mechanic_filter: None,
			selected_node: None,
			selected_edge: None,
			neighbor_mode: false,
			path_start: None,
			path_end: None,
			metric_mode: MetricMode::Default,
			default_labels,
		}
	}

	/// A fresh session using the configured default labels.
	pub fn from_config(config: &ExplorerConfig) -> Self {
		Self::with_labels(config.default_labels.iter().copied())
	}

	/// Current (already debounced) search term.
	pub fn search_term(&self) -> &str {
		&self.search_term
	}

	/// Labels currently shown.
	pub fn active_labels(&self) -> &HashSet<NodeLabel> {
		&self.active_labels
	}

	/// Archetypes currently shown. Empty means all.
	pub fn active_archetypes(&self) -> &HashSet<String> {
		&self.active_archetypes
	}

	/// Matchup types currently shown. Empty means all.
	pub fn relationship_filters(&self) -> &HashSet<EdgeType> {
		&self.relationship_filters
	}

	/// Mechanic facet.
	pub fn mechanic_filter(&self) -> Option<&str> {
		self.mechanic_filter.as_deref()
	}

	/// Selected node id.
	pub fn selected_node(&self) -> Option<&str> {
		self.selected_node.as_deref()
	}

	/// Selected edge id.
	pub fn selected_edge(&self) -> Option<&str> {
		self.selected_edge.as_deref()
	}

	/// Neighbor mode. Never on without a selected node.
	pub fn neighbor_mode(&self) -> bool {
		self.neighbor_mode && self.selected_node.is_some()
	}

	/// Path start.
	pub fn path_start(&self) -> Option<&str> {
		self.path_start.as_deref()
	}

	/// Path end.
	pub fn path_end(&self) -> Option<&str> {
		self.path_end.as_deref()
	}

	/// Metric mode.
	pub fn metric_mode(&self) -> MetricMode {
		self.metric_mode
	}

	/// Sets the search term. Debouncing is the caller's job.
	pub fn set_search_term(&mut self, term: impl Into<String>) {
		self.search_term = term.into();
	}

	/// Shows or hides a label.
	pub fn toggle_label(&mut self, label: NodeLabel) {
		filter::toggle_in_set(&mut self.active_labels, label);
	}

	/// Replaces the label facet.
	pub fn set_labels(&mut self, labels: impl IntoIterator<Item = NodeLabel>) {
		self.active_labels = labels.into_iter().collect();
	}

	/// Adds or removes an archetype from the archetype facet.
	pub fn toggle_archetype(&mut self, archetype: impl Into<String>) {
		filter::toggle_in_set(&mut self.active_archetypes, archetype.into());
	}

	/// Adds or removes a matchup type from the relationship facet.
	pub fn toggle_relationship(&mut self, kind: EdgeType) {
		filter::toggle_in_set(&mut self.relationship_filters, kind);
	}

	/// Sets or clears the mechanic facet. Blank names clear it.
	pub fn set_mechanic_filter(&mut self, mechanic: Option<String>) {
		self.mechanic_filter = mechanic.filter(|m| !m.trim().is_empty());
	}

	/// Selects a node, or clears the selection. Selecting a node clears the
	/// selected edge; clearing the selection turns neighbor mode off.
	pub fn select_node(&mut self, id: Option<NodeId>) {
		if id.is_some() {
			self.selected_edge = None;
		} else {
			self.neighbor_mode = false;
		}
		self.selected_node = id;
	}

	/// Selects an edge, or clears it. Selecting an edge clears the selected
	/// node and with it neighbor mode.
	pub fn select_edge(&mut self, id: Option<EdgeId>) {
		if id.is_some() {
			self.select_node(None);
		}
		self.selected_edge = id;
	}

	/// Clears both selections.
	pub fn clear_selection(&mut self) {
		self.select_node(None);
		self.selected_edge = None;
	}

	/// Turns neighbor mode on or off. Turning it on without a selected node
	/// is ignored.
	pub fn set_neighbor_mode(&mut self, on: bool) {
		self.neighbor_mode = on && self.selected_node.is_some();
	}

	/// Sets the path start.
	pub fn set_path_start(&mut self, id: Option<NodeId>) {
		self.path_start = id;
	}

	/// Sets the path end.
	pub fn set_path_end(&mut self, id: Option<NodeId>) {
		self.path_end = id;
	}

	/// Clears both path endpoints.
	pub fn clear_path(&mut self) {
		self.path_start = None;
		self.path_end = None;
	}

	/// Sets the metric mode.
	pub fn set_metric_mode(&mut self, mode: MetricMode) {
		self.metric_mode = mode;
	}

	/// Restores every facet and the search term, keeping selection and path.
	pub fn clear_filters(&mut self) {
		self.active_labels = self.default_labels.clone();
		self.active_archetypes.clear();
		self.relationship_filters.clear();
		self.mechanic_filter = None;
		self.search_term.clear();
	}

	/// Restores the whole session to its initial state.
	pub fn reset(&mut self) {
		*self = Self::with_labels(self.default_labels.iter().copied());
	}

	fn node_facets(&self) -> NodeFacets {
		NodeFacets {
			labels: self.active_labels.clone(),
			archetypes: self.active_archetypes.clone(),
			mechanic: self.mechanic_filter.clone(),
		}
	}

	fn edge_facets(&self) -> EdgeFacets {
		EdgeFacets {
			relationships: self.relationship_filters.clone(),
			mechanic: self.mechanic_filter.clone(),
			selected_edge: self.selected_edge.clone(),
		}
	}
}

/// Everything the rendering layer needs after one recomputation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExplorerView {
	/// Visible node ids, in dataset order.
	pub visible_nodes: Vec<NodeId>,
	/// Visible edge ids, in dataset order.
	pub visible_edges: Vec<EdgeId>,
	/// Selected node id.
	pub selected_node: Option<NodeId>,
	/// Selected edge id.
	pub selected_edge: Option<EdgeId>,
	/// Ranked search results.
	pub search_results: Vec<NodeId>,
	/// Search results plus the selected node.
	pub highlight: HashSet<NodeId>,
	/// Effective neighbor mode.
	pub neighbor_mode: bool,
	/// Selected node and its neighbors when neighbor mode is on.
	pub neighbor_nodes: HashSet<NodeId>,
	/// Edges from the selected node to its neighbors.
	pub neighbor_edges: HashSet<EdgeId>,
	/// Path node ids from start to end.
	pub path_nodes: Vec<NodeId>,
	/// Path edge ids, one per hop.
	pub path_edges: Vec<EdgeId>,
	/// Path query outcome.
	pub path_status: PathStatus,
	/// Metric size/color overrides.
	pub style: MetricStyle,
	/// Matchups of the selected node.
	pub relationships: Option<RelationshipSummary>,
	/// Detail of the selected edge.
	pub edge_detail: Option<EdgeDetail>,
}

/// A loaded dataset with every structure built once on load.
#[derive(Clone, Debug)]
pub struct Explorer {
	data: GraphData,
	index: GraphIndex,
	search: SearchIndex,
	rankings: Rankings,
	options: FacetOptions,
	max_explored: usize,
}

impl Explorer {
	/// Builds the index, the search structure and the rankings.
	pub fn new(data: GraphData, config: &ExplorerConfig) -> Self {
		let index = GraphIndex::build(&data.nodes, &data.edges);
		let search = SearchIndex::new(&data.nodes).with_limit(config.search_limit);
		let rankings = Rankings::new(&data.indexes);
		let options = FacetOptions::from_data(&data);
		Self {
			data,
			index,
			search,
			rankings,
			options,
			max_explored: config.max_explored_nodes,
		}
	}

	/// The dataset.
	pub fn data(&self) -> &GraphData {
		&self.data
	}

	/// The pathfinding index.
	pub fn index(&self) -> &GraphIndex {
		&self.index
	}

	/// Precomputed rankings.
	pub fn rankings(&self) -> &Rankings {
		&self.rankings
	}

	/// Facet option lists.
	pub fn options(&self) -> &FacetOptions {
		&self.options
	}

	/// Ranked search results for a term.
	pub fn search(&self, term: &str) -> Vec<&GraphNode> {
		self.search
			.query(term)
			.into_iter()
			.filter_map(|hit| self.data.nodes.get(hit.position))
			.collect()
	}

	/// Nodes passing the facets, plus every pinned node: the selection, the
	/// endpoints of the selected edge, the path and the neighbor set.
	pub fn visible_nodes(&self, state: &SessionState) -> Vec<&GraphNode> {
		let (path_nodes, _) = self.path(state);
		let neighbor_nodes = self.neighbors(state);
		self.visible_nodes_pinned(state, &self.pinned(state, &path_nodes, &neighbor_nodes))
	}

	fn pinned<'a>(
		&'a self,
		state: &'a SessionState,
		path_nodes: &'a [NodeId],
		neighbor_nodes: &'a HashSet<NodeId>,
	) -> HashSet<&'a str> {
		let mut pinned: HashSet<&str> = path_nodes.iter().map(String::as_str).collect();
		pinned.extend(neighbor_nodes.iter().map(String::as_str));
		pinned.extend(state.selected_node());
		pinned.extend(state.path_start());
		pinned.extend(state.path_end());
		if let Some(edge) = state.selected_edge().and_then(|id| self.data.edge(id)) {
			pinned.insert(edge.source.as_str());
			pinned.insert(edge.target.as_str());
		}
		pinned
	}

	fn visible_nodes_pinned(&self, state: &SessionState, pinned: &HashSet<&str>) -> Vec<&GraphNode> {
		let facets = state.node_facets();
		self.data
			.nodes
			.iter()
			.filter(|n| pinned.contains(n.id.as_str()) || filter::node_passes(n, &facets))
			.collect()
	}

	fn neighbors(&self, state: &SessionState) -> HashSet<NodeId> {
		neighbors::neighbor_nodes(&self.data.indexes, state.selected_node(), state.neighbor_mode())
	}

	/// Edges passing the facets among the given visible nodes.
	pub fn visible_edges<'a>(
		&'a self,
		state: &SessionState,
		visible_nodes: &[&GraphNode],
	) -> Vec<&'a GraphEdge> {
		let visible: HashSet<&str> = visible_nodes.iter().map(|n| n.id.as_str()).collect();
		filter::filter_edges(&self.data.edges, &visible, &state.edge_facets())
	}

	/// Shortest path between the chosen endpoints, with its edges.
	pub fn path(&self, state: &SessionState) -> (Vec<NodeId>, Vec<EdgeId>) {
		let nodes = path::shortest_path_capped(
			&self.index,
			state.path_start(),
			state.path_end(),
			self.max_explored,
		);
		let edges = path::path_edges(&self.data.edges, &nodes);
		(nodes, edges)
	}

	/// Size and color overrides for the current metric mode.
	pub fn style(&self, state: &SessionState) -> MetricStyle {
		metrics::rank(state.metric_mode(), &self.data, &self.rankings)
	}

	/// Recomputes every output for a state snapshot.
	pub fn view(&self, state: &SessionState) -> ExplorerView {
		let (path_nodes, path_edges) = self.path(state);
		let path_status = PathStatus::of(state.path_start(), state.path_end(), &path_nodes);

		let neighbor_mode = state.neighbor_mode();
		let neighbor_nodes = self.neighbors(state);
		let neighbor_edges =
			neighbors::neighbor_edges(&self.data.edges, state.selected_node(), &neighbor_nodes);

		let pinned = self.pinned(state, &path_nodes, &neighbor_nodes);
		let nodes = self.visible_nodes_pinned(state, &pinned);
		let edges = self.visible_edges(state, &nodes);
		let visible_nodes = nodes.iter().map(|n| n.id.clone()).collect();
		let visible_edges = edges.iter().map(|e| e.id.clone()).collect();

		let search_results: Vec<NodeId> = self
			.search(state.search_term())
			.into_iter()
			.map(|n| n.id.clone())
			.collect();
		// Pinned ids already cover the selection, the path and the neighbors.
		let mut highlight: HashSet<NodeId> = search_results.iter().cloned().collect();
		highlight.extend(pinned.iter().map(|id| id.to_string()));

		let view = ExplorerView {
			visible_nodes,
			visible_edges,
			selected_node: state.selected_node().map(str::to_string),
			selected_edge: state.selected_edge().map(str::to_string),
			search_results,
			highlight,
			neighbor_mode,
			neighbor_nodes,
			neighbor_edges,
			path_nodes,
			path_edges,
			path_status,
			style: self.style(state),
			relationships: state
				.selected_node()
				.map(|id| relations::relationships_of(&self.data.indexes, id)),
			edge_detail: state
				.selected_edge()
				.and_then(|id| relations::edge_detail(&self.data, id)),
		};
		debug!(
			"view: {} nodes, {} edges, {} highlighted, path {:?}",
			view.visible_nodes.len(),
			view.visible_edges.len(),
			view.highlight.len(),
			view.path_status
		);
		view
	}
}
