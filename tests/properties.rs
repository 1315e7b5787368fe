use std::collections::{HashMap, HashSet, VecDeque};

use matchup_graph_explorer::graph::filter::{self, EdgeFacets, NodeFacets};
use matchup_graph_explorer::graph::index::pair_key;
use matchup_graph_explorer::graph::metrics::{self, DEGREE_SIZE_BOOST, Rankings};
use matchup_graph_explorer::graph::path::{path_edges, shortest_path};
use matchup_graph_explorer::graph::types::{
	GraphIndexes, GraphMeta, Properties, PropertyValue,
};
use matchup_graph_explorer::graph::{
	EdgeType, GraphData, GraphEdge, GraphIndex, GraphNode, MetricMode, NodeLabel,
};
use proptest::prelude::*;

const KINDS: [EdgeType; 5] = [
	EdgeType::StrongAgainst,
	EdgeType::WeakAgainst,
	EdgeType::EvenAgainst,
	EdgeType::UsesMechanic,
	EdgeType::HasAbility,
];

fn build(labels: Vec<usize>, links: Vec<(usize, usize, usize)>) -> GraphData {
	let nodes: Vec<GraphNode> = labels
		.iter()
		.enumerate()
		.map(|(i, &l)| {
			let label = NodeLabel::ALL[l];
			let mut properties = Properties::new();
			properties.insert("name".into(), PropertyValue::Text(format!("N{i}")));
			GraphNode {
				id: format!("{}:N{i}", label.as_str().to_lowercase()),
				label,
				properties,
				size: 1.0 + l as f64 * 0.5,
				x: None,
				y: None,
			}
		})
		.collect();
	let edges: Vec<GraphEdge> = links
		.iter()
		.enumerate()
		.map(|(j, &(s, t, k))| GraphEdge {
			id: format!("e{j}"),
			source: nodes[s].id.clone(),
			target: nodes[t].id.clone(),
			kind: KINDS[k].clone(),
			properties: Properties::new(),
		})
		.collect();

	let mut indexes = GraphIndexes::default();
	for e in &edges {
		*indexes.degrees_out.entry(e.source.clone()).or_default() += 1;
		*indexes.degrees_in.entry(e.target.clone()).or_default() += 1;
	}
	GraphData {
		meta: GraphMeta {
			node_count: nodes.len(),
			edge_count: edges.len(),
			..GraphMeta::default()
		},
		nodes,
		edges,
		indexes,
	}
}

fn graph() -> impl Strategy<Value = GraphData> {
	(1usize..12)
		.prop_flat_map(|n| {
			(
				prop::collection::vec(0usize..4, n),
				prop::collection::vec((0..n, 0..n, 0usize..KINDS.len()), 0..30),
			)
		})
		.prop_map(|(labels, links)| build(labels, links))
}

/// Plain BFS distance in hops over the undirected projection.
fn hops(data: &GraphData, a: &str, b: &str) -> Option<usize> {
	let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
	for e in data.edges.iter().filter(|e| e.source != e.target) {
		adjacency.entry(e.source.as_str()).or_default().push(e.target.as_str());
		adjacency.entry(e.target.as_str()).or_default().push(e.source.as_str());
	}
	let mut seen = HashSet::from([a]);
	let mut queue = VecDeque::from([(a, 0)]);
	while let Some((node, d)) = queue.pop_front() {
		if node == b {
			return Some(d);
		}
		for &next in adjacency.get(node).into_iter().flatten() {
			if seen.insert(next) {
				queue.push_back((next, d + 1));
			}
		}
	}
	None
}

proptest! {
	#[test]
	fn index_keeps_one_edge_per_pair(data in graph()) {
		let index = GraphIndex::build(&data.nodes, &data.edges);
		let pairs: HashSet<String> = data
			.edges
			.iter()
			.filter(|e| e.source != e.target)
			.map(|e| pair_key(&e.source, &e.target))
			.collect();
		prop_assert_eq!(index.edge_count(), pairs.len());
		prop_assert_eq!(index.retained_pairs(), &pairs);

		let again = GraphIndex::build(&data.nodes, &data.edges);
		prop_assert_eq!(again.retained_pairs(), index.retained_pairs());
		prop_assert_eq!(again.node_count(), data.nodes.len());
	}

	#[test]
	fn shortest_path_is_valid_and_minimal(data in graph(), a in 0usize..12, b in 0usize..12) {
		let (a, b) = (a % data.nodes.len(), b % data.nodes.len());
		let (a, b) = (data.nodes[a].id.as_str(), data.nodes[b].id.as_str());
		let index = GraphIndex::build(&data.nodes, &data.edges);
		let path = shortest_path(&index, Some(a), Some(b));

		if a == b {
			prop_assert!(path.is_empty());
		} else {
			match hops(&data, a, b) {
				None => prop_assert!(path.is_empty()),
				Some(d) => {
					prop_assert_eq!(path.len(), d + 1);
					prop_assert_eq!(path.first().map(String::as_str), Some(a));
					prop_assert_eq!(path.last().map(String::as_str), Some(b));
					prop_assert_eq!(path_edges(&data.edges, &path).len(), d);
				}
			}
		}
	}

	#[test]
	fn shrinking_labels_never_grows_visible_nodes(data in graph(), dropped in 0usize..4) {
		let all = NodeFacets::default();
		let mut fewer = NodeFacets::default();
		fewer.labels.remove(&NodeLabel::ALL[dropped]);

		let wide: HashSet<&str> = filter::filter_nodes(&data.nodes, &all)
			.into_iter()
			.map(|n| n.id.as_str())
			.collect();
		for node in filter::filter_nodes(&data.nodes, &fewer) {
			prop_assert!(wide.contains(node.id.as_str()));
			prop_assert!(node.label != NodeLabel::ALL[dropped]);
		}

		fewer.labels.clear();
		prop_assert!(filter::filter_nodes(&data.nodes, &fewer).is_empty());
	}

	#[test]
	fn shrinking_relationships_only_keeps_the_selection(
		data in graph(),
		selected in prop::option::of(0usize..30),
	) {
		let visible: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		let selected_edge = selected.map(|j| format!("e{j}"));
		let wide = EdgeFacets {
			relationships: HashSet::from([EdgeType::StrongAgainst, EdgeType::WeakAgainst]),
			selected_edge: selected_edge.clone(),
			..EdgeFacets::default()
		};
		let narrow = EdgeFacets {
			relationships: HashSet::from([EdgeType::StrongAgainst]),
			selected_edge: selected_edge.clone(),
			..EdgeFacets::default()
		};

		let wide_ids: HashSet<&str> = filter::filter_edges(&data.edges, &visible, &wide)
			.into_iter()
			.map(|e| e.id.as_str())
			.collect();
		for edge in filter::filter_edges(&data.edges, &visible, &narrow) {
			prop_assert!(wide_ids.contains(edge.id.as_str()));
			let is_selected = selected_edge.as_deref() == Some(edge.id.as_str());
			prop_assert!(
				is_selected || edge.kind != EdgeType::WeakAgainst,
				"{} should be hidden", edge.id
			);
		}
	}

	#[test]
	fn out_degree_style_stays_in_range(data in graph()) {
		let rankings = Rankings::new(&data.indexes);
		let style = metrics::rank(MetricMode::OutDegree, &data, &rankings);
		for node in &data.nodes {
			if let Some(&size) = style.size_by_node.get(&node.id) {
				prop_assert!(size >= node.size - 1e-9);
				prop_assert!(size <= node.size + DEGREE_SIZE_BOOST + 1e-9);
			}
			if let Some(color) = style.color_by_node.get(&node.id) {
				prop_assert_eq!(color.len(), 7);
				prop_assert!(color.starts_with('#'));
			}
		}
		if data.edges.is_empty() {
			prop_assert!(style.is_empty());
		}
	}
}
