//! Degree and mechanic-usage rankings mapped to node size and color.

use std::cmp::Reverse;
use std::collections::HashMap;

use super::types::{DEFAULT_NODE_SIZE, GraphData, GraphIndexes, GraphNode, NodeId, NodeLabel};

/// Extra size given to the top-ranked node in the degree modes.
pub const DEGREE_SIZE_BOOST: f64 = 1.2;
/// Extra size given to the most used mechanic.
pub const MECHANIC_SIZE_BOOST: f64 = 1.5;

/// Low/high color ramps per mode.
pub const OUT_DEGREE_RAMP: (&str, &str) = ("#bfdbfe", "#1d4ed8");
/// Strong-count ramp.
pub const STRONG_COUNT_RAMP: (&str, &str) = ("#fecaca", "#b91c1c");
/// Mechanic-usage ramp.
pub const MECHANIC_USAGE_RAMP: (&str, &str) = ("#bbf7d0", "#047857");

/// Which metric drives visual emphasis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MetricMode {
	/// No emphasis; base sizes and label colors.
	#[default]
	Default,
	/// Out-degree of every node.
	OutDegree,
	/// Number of characters a character is strong against.
	StrongCount,
	/// Number of characters using each mechanic.
	MechanicUsage,
}

impl MetricMode {
	/// Every mode, in panel order.
	pub const ALL: [MetricMode; 4] = [
		MetricMode::Default,
		MetricMode::OutDegree,
		MetricMode::StrongCount,
		MetricMode::MechanicUsage,
	];

	/// Stable key, also used as a DOM test id suffix.
	pub fn as_str(&self) -> &'static str {
		match self {
			MetricMode::Default => "default",
			MetricMode::OutDegree => "outDegree",
			MetricMode::StrongCount => "strongCount",
			MetricMode::MechanicUsage => "mechanicUsage",
		}
	}

	/// Button caption.
	pub fn title(&self) -> &'static str {
		match self {
			MetricMode::Default => "Default",
			MetricMode::OutDegree => "Out-degree",
			MetricMode::StrongCount => "Strong matchups",
			MetricMode::MechanicUsage => "Mechanic usage",
		}
	}
}

/// A ranked node and its metric value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankEntry {
	/// Node id.
	pub id: NodeId,
	/// Metric value.
	pub value: u64,
}

/// How many characters use and counter a mechanic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MechanicUsage {
	/// Mechanic name.
	pub name: String,
	/// Characters using it.
	pub usage: u64,
	/// Characters countering it.
	pub counter: u64,
}

/// Rankings built once per dataset, each sorted by value descending, then
/// by key ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rankings {
	/// Out-degree per node.
	pub out_degree: Vec<RankEntry>,
	/// Strong-against count per character.
	pub strong_count: Vec<RankEntry>,
	/// Usage per mechanic.
	pub mechanic_usage: Vec<MechanicUsage>,
}

impl Rankings {
	/// Builds the rankings from the precomputed indexes.
	pub fn new(indexes: &GraphIndexes) -> Self {
		let mut out_degree: Vec<RankEntry> = indexes
			.degrees_out
			.iter()
			.map(|(id, &value)| RankEntry {
				id: id.clone(),
				value,
			})
			.collect();
		let mut strong_count: Vec<RankEntry> = indexes
			.strong_against
			.iter()
			.map(|(id, targets)| RankEntry {
				id: id.clone(),
				value: targets.len() as u64,
			})
			.collect();
		let mut mechanic_usage: Vec<MechanicUsage> = indexes
			.mechanic_usage
			.iter()
			.map(|(name, &usage)| MechanicUsage {
				name: name.clone(),
				usage,
				counter: indexes.mechanic_counter.get(name).copied().unwrap_or(0),
			})
			.collect();

		out_degree.sort_by(|a, b| (Reverse(a.value), &a.id).cmp(&(Reverse(b.value), &b.id)));
		strong_count.sort_by(|a, b| (Reverse(a.value), &a.id).cmp(&(Reverse(b.value), &b.id)));
		mechanic_usage
			.sort_by(|a, b| (Reverse(a.usage), &a.name).cmp(&(Reverse(b.usage), &b.name)));

		Self {
			out_degree,
			strong_count,
			mechanic_usage,
		}
	}

	/// The node ranking behind a degree mode. Other modes have none.
	pub fn entries(&self, mode: MetricMode) -> &[RankEntry] {
		match mode {
			MetricMode::OutDegree => &self.out_degree,
			MetricMode::StrongCount => &self.strong_count,
			_ => &[],
		}
	}
}

/// Size and color overrides per node. Nodes absent from a map keep their
/// base size or label color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricStyle {
	/// Render size per node.
	pub size_by_node: HashMap<NodeId, f64>,
	/// Fill color per node, `#rrggbb`.
	pub color_by_node: HashMap<NodeId, String>,
}

impl MetricStyle {
	/// Whether no node is restyled.
	pub fn is_empty(&self) -> bool {
		self.size_by_node.is_empty() && self.color_by_node.is_empty()
	}
}

/// Computes the style overrides for a metric mode.
pub fn rank(mode: MetricMode, data: &GraphData, rankings: &Rankings) -> MetricStyle {
	let nodes: HashMap<&str, &GraphNode> = data.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
	let base_size = |id: &str| nodes.get(id).map(|n| n.size).unwrap_or(DEFAULT_NODE_SIZE);
	let mut style = MetricStyle::default();

	match mode {
		MetricMode::Default => {}
		MetricMode::OutDegree | MetricMode::StrongCount => {
			let ramp = if mode == MetricMode::OutDegree {
				OUT_DEGREE_RAMP
			} else {
				STRONG_COUNT_RAMP
			};
			let list = rankings.entries(mode);
			let max = list.first().map(|e| e.value).unwrap_or(0);
			if max == 0 {
				return style;
			}
			for entry in list {
				let t = unit_ratio(entry.value, max);
				style.size_by_node.insert(
					entry.id.clone(),
					base_size(&entry.id) + DEGREE_SIZE_BOOST * t,
				);
				if entry.value > 0 {
					if let Some(color) = lerp_color(ramp.0, ramp.1, t) {
						style.color_by_node.insert(entry.id.clone(), color);
					}
				}
			}
		}
		MetricMode::MechanicUsage => {
			let max = rankings.mechanic_usage.first().map(|m| m.usage).unwrap_or(0);
			if max == 0 {
				return style;
			}
			let usage: HashMap<&str, u64> = rankings
				.mechanic_usage
				.iter()
				.map(|m| (m.name.as_str(), m.usage))
				.collect();
			for node in data.nodes.iter().filter(|n| n.label == NodeLabel::Mechanic) {
				let Some(&value) = node.name().and_then(|name| usage.get(name)) else {
					continue;
				};
				let t = unit_ratio(value, max);
				style
					.size_by_node
					.insert(node.id.clone(), node.size + MECHANIC_SIZE_BOOST * t);
				if value > 0 {
					if let Some(color) =
						lerp_color(MECHANIC_USAGE_RAMP.0, MECHANIC_USAGE_RAMP.1, t)
					{
						style.color_by_node.insert(node.id.clone(), color);
					}
				}
			}
		}
	}
	style
}

fn unit_ratio(value: u64, max: u64) -> f64 {
	(value as f64 / max as f64).clamp(0.0, 1.0)
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
	let hex = color.strip_prefix('#').unwrap_or(color);
	if hex.len() != 6 || !hex.is_ascii() {
		return None;
	}
	let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
	Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Linear per-channel interpolation between two `#rrggbb` colors, rounded
/// to the nearest integer. `t` is clamped to `[0, 1]`.
pub fn lerp_color(from: &str, to: &str, t: f64) -> Option<String> {
	let (a, b) = (parse_hex(from)?, parse_hex(to)?);
	let t = t.clamp(0.0, 1.0);
	let mix = |i: usize| {
		let (s, e) = (a[i] as f64, b[i] as f64);
		(s + (e - s) * t).round().clamp(0.0, 255.0) as u8
	};
	Some(format!("#{:02x}{:02x}{:02x}", mix(0), mix(1), mix(2)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::fixture::{roster, scenario};

	#[test]
	fn test_lerp_endpoints_and_midpoint() {
		assert_eq!(lerp_color("#000000", "#ffffff", 0.0).as_deref(), Some("#000000"));
		assert_eq!(lerp_color("#000000", "#ffffff", 1.0).as_deref(), Some("#ffffff"));
		// 127.5 rounds up.
		assert_eq!(lerp_color("#000000", "#ffffff", 0.5).as_deref(), Some("#808080"));
		assert_eq!(lerp_color("#bfdbfe", "#1d4ed8", 1.0).as_deref(), Some("#1d4ed8"));
		assert_eq!(lerp_color("#bfdbfe", "#1d4ed8", 7.0).as_deref(), Some("#1d4ed8"));
		assert_eq!(lerp_color("blue", "#1d4ed8", 0.5), None);
	}

	#[test]
	fn test_rankings_are_sorted() {
		let data = roster();
		let rankings = Rankings::new(&data.indexes);
		assert_eq!(rankings.out_degree[0].id, "character:Abrams");
		assert_eq!(rankings.out_degree[0].value, 7);
		assert!(rankings.out_degree.windows(2).all(|w| w[0].value >= w[1].value));
		assert_eq!(rankings.mechanic_usage[0].name, "Stun");
		assert_eq!(rankings.mechanic_usage[0].usage, 2);
		assert_eq!(rankings.mechanic_usage[0].counter, 1);
	}

	#[test]
	fn test_default_mode_is_empty() {
		let data = roster();
		let rankings = Rankings::new(&data.indexes);
		assert!(rank(MetricMode::Default, &data, &rankings).is_empty());
	}

	#[test]
	fn test_out_degree_bounds() {
		let data = roster();
		let rankings = Rankings::new(&data.indexes);
		let style = rank(MetricMode::OutDegree, &data, &rankings);
		for (id, size) in &style.size_by_node {
			let base = data.node(id).map(|n| n.size).unwrap_or(DEFAULT_NODE_SIZE);
			assert!(*size >= base && *size <= base + DEGREE_SIZE_BOOST, "{id}: {size}");
		}
		let top = &style.size_by_node["character:Abrams"];
		assert_eq!(*top, 2.0 + DEGREE_SIZE_BOOST);
		assert_eq!(style.color_by_node["character:Abrams"], "#1d4ed8");
	}

	#[test]
	fn test_strong_count_colors_only_positive_values() {
		let mut data = scenario();
		data.indexes
			.strong_against
			.insert("character:B".into(), Vec::new());
		let rankings = Rankings::new(&data.indexes);
		let style = rank(MetricMode::StrongCount, &data, &rankings);
		assert_eq!(style.size_by_node["character:B"], 2.0);
		assert!(!style.color_by_node.contains_key("character:B"));
		assert_eq!(style.color_by_node["character:A"], "#b91c1c");
	}

	#[test]
	fn test_zero_max_yields_empty_maps() {
		let mut data = scenario();
		data.indexes.strong_against.clear();
		data.indexes
			.strong_against
			.insert("character:A".into(), Vec::new());
		let rankings = Rankings::new(&data.indexes);
		assert!(rank(MetricMode::StrongCount, &data, &rankings).is_empty());
	}

	#[test]
	fn test_mechanic_usage_scales_mechanics_only() {
		let data = roster();
		let rankings = Rankings::new(&data.indexes);
		let style = rank(MetricMode::MechanicUsage, &data, &rankings);
		assert_eq!(style.size_by_node["mechanic:Stun"], 2.0 + MECHANIC_SIZE_BOOST);
		assert_eq!(style.color_by_node["mechanic:Stun"], "#047857");
		assert_eq!(style.size_by_node["mechanic:Barrier"], 2.0 + MECHANIC_SIZE_BOOST * 0.5);
		assert!(style.size_by_node.keys().all(|id| id.starts_with("mechanic:")));
	}
}
