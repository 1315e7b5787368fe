//! Shortest unweighted paths over the undirected projection.
//!
//! Bidirectional breadth-first search: the side with the smaller frontier
//! expands one full level at a time, and the first node reached by both
//! sides closes the path. Both searches are level-synchronous, so the first
//! meeting node always lies on a shortest path. Ties between equal-length
//! paths follow adjacency insertion order, which is fixed by the dataset.

use std::collections::HashMap;

use log::warn;
use petgraph::graph::NodeIndex;

use super::index::GraphIndex;
use super::types::{EdgeId, GraphEdge, NodeId};

/// Default cap on the number of nodes a single search may visit.
pub const MAX_EXPLORED_NODES: usize = 50_000;

/// Outcome of the current path query, for the "no path" message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathStatus {
	/// One or both endpoints are not chosen.
	#[default]
	Unset,
	/// Both endpoints are chosen but no path connects them.
	NoPath,
	/// A path with this many nodes was found.
	Found(usize),
}

impl PathStatus {
	/// Classifies a path result for the given endpoints.
	pub fn of(start: Option<&str>, end: Option<&str>, path: &[NodeId]) -> Self {
		match (start, end) {
			(Some(_), Some(_)) if path.is_empty() => PathStatus::NoPath,
			(Some(_), Some(_)) => PathStatus::Found(path.len()),
			_ => PathStatus::Unset,
		}
	}
}

type Parents = HashMap<NodeIndex, Option<NodeIndex>>;

/// Shortest path from `a` to `b`, both inclusive. Empty when either id is
/// missing or unknown, when `a == b`, or when no path exists.
pub fn shortest_path(index: &GraphIndex, a: Option<&str>, b: Option<&str>) -> Vec<NodeId> {
	shortest_path_capped(index, a, b, MAX_EXPLORED_NODES)
}

/// [`shortest_path`] with an explicit exploration cap. Hitting the cap
/// reports no path.
pub fn shortest_path_capped(
	index: &GraphIndex,
	a: Option<&str>,
	b: Option<&str>,
	max_explored: usize,
) -> Vec<NodeId> {
	let (Some(a), Some(b)) = (a, b) else {
		return Vec::new();
	};
	if a == b {
		return Vec::new();
	}
	let (Some(start), Some(end)) = (index.node_index(a), index.node_index(b)) else {
		return Vec::new();
	};
	bidirectional(index, start, end, max_explored).unwrap_or_default()
}

fn bidirectional(
	index: &GraphIndex,
	start: NodeIndex,
	end: NodeIndex,
	max_explored: usize,
) -> Option<Vec<NodeId>> {
	let mut forward: Parents = HashMap::from([(start, None)]);
	let mut backward: Parents = HashMap::from([(end, None)]);
	let mut forward_frontier = vec![start];
	let mut backward_frontier = vec![end];

	while !forward_frontier.is_empty() && !backward_frontier.is_empty() {
		if forward.len() + backward.len() > max_explored {
			warn!(
				"path search gave up after visiting {} nodes",
				forward.len() + backward.len()
			);
			return None;
		}

		let forward_side = forward_frontier.len() <= backward_frontier.len();
		let step = if forward_side {
			expand(index, &forward_frontier, &mut forward, &backward)
		} else {
			expand(index, &backward_frontier, &mut backward, &forward)
		};
		match step {
			Step::Meet(meet) => return assemble(index, &forward, &backward, meet),
			Step::Next(next) if forward_side => forward_frontier = next,
			Step::Next(next) => backward_frontier = next,
		}
	}
	None
}

enum Step {
	Next(Vec<NodeIndex>),
	Meet(NodeIndex),
}

fn expand(index: &GraphIndex, frontier: &[NodeIndex], visited: &mut Parents, other: &Parents) -> Step {
	let mut next = Vec::new();
	for &node in frontier {
		for &neighbor in index.adjacent(node) {
			if visited.contains_key(&neighbor) {
				continue;
			}
			visited.insert(neighbor, Some(node));
			if other.contains_key(&neighbor) {
				return Step::Meet(neighbor);
			}
			next.push(neighbor);
		}
	}
	Step::Next(next)
}

fn assemble(
	index: &GraphIndex,
	forward: &Parents,
	backward: &Parents,
	meet: NodeIndex,
) -> Option<Vec<NodeId>> {
	let mut head = vec![meet];
	let mut cursor = meet;
	while let Some(&Some(parent)) = forward.get(&cursor) {
		head.push(parent);
		cursor = parent;
	}
	head.reverse();

	cursor = meet;
	while let Some(&Some(parent)) = backward.get(&cursor) {
		head.push(parent);
		cursor = parent;
	}

	head.into_iter()
		.map(|idx| index.node_id(idx).cloned())
		.collect()
}

/// Edge ids along a node path: for each consecutive pair, the first raw
/// edge connecting them in either direction. Pairs without an edge are skipped.
pub fn path_edges(edges: &[GraphEdge], path: &[NodeId]) -> Vec<EdgeId> {
	path.windows(2)
		.filter_map(|pair| {
			let (a, b) = (&pair[0], &pair[1]);
			edges
				.iter()
				.find(|e| (&e.source == a && &e.target == b) || (&e.source == b && &e.target == a))
				.map(|e| e.id.clone())
		})
		.collect()
}
