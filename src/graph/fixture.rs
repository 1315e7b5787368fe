//! Small hand-built datasets shared by the unit tests.

use super::types::{
	EdgeType, GraphData, GraphEdge, GraphIndexes, GraphMeta, GraphNode, NodeLabel, Properties,
	PropertyValue,
};

pub fn node(id: &str, label: NodeLabel) -> GraphNode {
	let mut properties = Properties::new();
	if let Some((_, name)) = id.split_once(':') {
		properties.insert("name".into(), PropertyValue::Text(name.into()));
	}
	GraphNode {
		id: id.into(),
		label,
		properties,
		size: 2.0,
		x: None,
		y: None,
	}
}

pub fn with_text(mut node: GraphNode, key: &str, value: &str) -> GraphNode {
	node.properties
		.insert(key.into(), PropertyValue::Text(value.into()));
	node
}

pub fn with_list(mut node: GraphNode, key: &str, values: &[&str]) -> GraphNode {
	node.properties.insert(
		key.into(),
		PropertyValue::List(values.iter().map(|v| v.to_string()).collect()),
	);
	node
}

pub fn edge(id: &str, source: &str, target: &str, kind: EdgeType) -> GraphEdge {
	GraphEdge {
		id: id.into(),
		source: source.into(),
		target: target.into(),
		kind,
		properties: Properties::new(),
	}
}

/// Fills `meta` and the neighbor/degree indexes the way the pipeline would.
pub fn assemble(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> GraphData {
	let mut meta = GraphMeta {
		generated_at: "2025-01-01T00:00:00".into(),
		node_count: nodes.len(),
		edge_count: edges.len(),
		..GraphMeta::default()
	};
	let mut indexes = GraphIndexes::default();

	for n in &nodes {
		*meta
			.label_distribution
			.entry(n.label.as_str().to_string())
			.or_default() += 1;
		if n.label == NodeLabel::Character {
			if let Some(a) = n.archetype() {
				*meta.archetype_counts.entry(a.to_string()).or_default() += 1;
			}
			for m in n.list("mechanics_used") {
				*indexes.mechanic_usage.entry(m.clone()).or_default() += 1;
			}
			for m in n.list("mechanics_countered") {
				*indexes.mechanic_counter.entry(m.clone()).or_default() += 1;
			}
		}
		indexes.neighbors.entry(n.id.clone()).or_default();
	}
	for e in &edges {
		*indexes.degrees_out.entry(e.source.clone()).or_default() += 1;
		*indexes.degrees_in.entry(e.target.clone()).or_default() += 1;
		for (a, b) in [(&e.source, &e.target), (&e.target, &e.source)] {
			let list = indexes.neighbors.entry(a.clone()).or_default();
			if !list.contains(b) {
				list.push(b.clone());
			}
		}
		let matchup = match e.kind {
			EdgeType::StrongAgainst => Some(&mut indexes.strong_against),
			EdgeType::WeakAgainst => Some(&mut indexes.weak_against),
			EdgeType::EvenAgainst => Some(&mut indexes.even_against),
			_ => None,
		};
		if let Some(map) = matchup {
			map.entry(e.source.clone()).or_default().push(e.target.clone());
		}
	}
	for list in indexes.neighbors.values_mut() {
		list.sort();
	}

	GraphData {
		meta,
		nodes,
		edges,
		indexes,
	}
}

/// A (X, uses Barrier) --STRONG--> B (Y); A --USES--> Barrier.
pub fn scenario() -> GraphData {
	let a = with_list(
		with_text(node("character:A", NodeLabel::Character), "archetype", "X"),
		"mechanics_used",
		&["Barrier"],
	);
	let b = with_text(node("character:B", NodeLabel::Character), "archetype", "Y");
	let m = node("mechanic:Barrier", NodeLabel::Mechanic);
	assemble(
		vec![a, b, m],
		vec![
			edge(
				"edge:A-uses-Barrier",
				"character:A",
				"mechanic:Barrier",
				EdgeType::UsesMechanic,
			),
			edge(
				"edge:A-strong-B",
				"character:A",
				"character:B",
				EdgeType::StrongAgainst,
			),
		],
	)
}

/// A wider roster: a matchup chain C1..C4, a shortcut C1-C4 via a mechanic,
/// an ability, an archetype and an island node with no edges.
pub fn roster() -> GraphData {
	let c1 = with_list(
		with_list(
			with_text(
				with_text(node("character:Abrams", NodeLabel::Character), "archetype", "Brawler"),
				"description",
				"Frontline bruiser who charges into fights",
			),
			"mechanics_used",
			&["Stun", "Lifesteal"],
		),
		"mechanics_countered",
		&["Barrier"],
	);
	let c2 = with_list(
		with_text(node("character:Bebop", NodeLabel::Character), "archetype", "Hookshot"),
		"mechanics_used",
		&["Stun"],
	);
	let c3 = with_list(
		with_text(node("character:Dynamo", NodeLabel::Character), "archetype", "Support"),
		"mechanics_used",
		&["Barrier"],
	);
	let c4 = with_list(
		with_text(node("character:Haze", NodeLabel::Character), "archetype", "Assassin"),
		"mechanics_countered",
		&["Stun"],
	);
	let island = with_text(node("character:Lonely", NodeLabel::Character), "archetype", "Support");
	let stun = with_text(node("mechanic:Stun", NodeLabel::Mechanic), "category", "Crowd Control");
	let barrier = with_text(node("mechanic:Barrier", NodeLabel::Mechanic), "category", "Defense");
	let lifesteal = node("mechanic:Lifesteal", NodeLabel::Mechanic);
	let charge = node("ability:Shoulder Charge", NodeLabel::Ability);
	let brawler = node("archetype:Brawler", NodeLabel::Archetype);

	assemble(
		vec![c1, c2, c3, c4, island, stun, barrier, lifesteal, charge, brawler],
		vec![
			edge("m0", "character:Abrams", "character:Bebop", EdgeType::StrongAgainst),
			edge("m1", "character:Bebop", "character:Dynamo", EdgeType::StrongAgainst),
			edge("m2", "character:Dynamo", "character:Haze", EdgeType::WeakAgainst),
			edge("m3", "character:Bebop", "character:Abrams", EdgeType::WeakAgainst),
			edge("m4", "character:Abrams", "character:Dynamo", EdgeType::EvenAgainst),
			edge("m5", "character:Dynamo", "character:Abrams", EdgeType::EvenAgainst),
			edge("u0", "character:Abrams", "mechanic:Stun", EdgeType::UsesMechanic),
			edge("u1", "character:Bebop", "mechanic:Stun", EdgeType::UsesMechanic),
			edge("u2", "character:Dynamo", "mechanic:Barrier", EdgeType::UsesMechanic),
			edge("u3", "character:Abrams", "mechanic:Lifesteal", EdgeType::UsesMechanic),
			edge("k0", "character:Haze", "mechanic:Stun", EdgeType::CharacterCountersMechanic),
			edge("k1", "character:Abrams", "mechanic:Barrier", EdgeType::CharacterCountersMechanic),
			edge("h0", "character:Abrams", "ability:Shoulder Charge", EdgeType::HasAbility),
			edge("a0", "character:Abrams", "archetype:Brawler", EdgeType::IsArchetype),
		],
	)
}
