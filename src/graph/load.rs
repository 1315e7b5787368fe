//! Parsing and structural validation of `graph.json`.
//!
//! The document is validated offline before it ships; the checks here only
//! guard against a truncated or mismatched file reaching the engine.

use log::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::types::GraphData;
use crate::error::{LoadError, Result};

/// Fetches the graph document over HTTP and parses it.
pub async fn fetch_graph(url: &str) -> Result<GraphData> {
	let json = fetch_text(url).await?;
	parse_graph(&json)
}

async fn fetch_text(url: &str) -> Result<String> {
	let failed = |e: JsValue| LoadError::Fetch {
		url: url.to_string(),
		message: e.as_string().unwrap_or_else(|| format!("{e:?}")),
	};
	let window = web_sys::window().ok_or_else(|| failed(JsValue::from_str("no window")))?;

	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(failed)?
		.dyn_into()
		.map_err(failed)?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}

	let body = JsFuture::from(response.text().map_err(failed)?)
		.await
		.map_err(failed)?;
	body.as_string()
		.ok_or_else(|| failed(JsValue::from_str("response body is not text")))
}

/// Parses and validates a graph document.
pub fn parse_graph(json: &str) -> Result<GraphData> {
	let data: GraphData = serde_json::from_str(json)?;
	validate(&data)?;
	info!(
		"graph loaded: {} nodes, {} edges (generated {})",
		data.nodes.len(),
		data.edges.len(),
		if data.meta.generated_at.is_empty() {
			"unknown"
		} else {
			&data.meta.generated_at
		}
	);
	Ok(data)
}

/// Structural checks the serde model cannot express.
pub fn validate(data: &GraphData) -> Result<()> {
	if data.meta.node_count != data.nodes.len() {
		return Err(LoadError::Schema {
			message: format!(
				"meta.node_count is {} but {} nodes are present",
				data.meta.node_count,
				data.nodes.len()
			),
		});
	}
	if data.meta.edge_count != data.edges.len() {
		return Err(LoadError::Schema {
			message: format!(
				"meta.edge_count is {} but {} edges are present",
				data.meta.edge_count,
				data.edges.len()
			),
		});
	}
	if let Some(pos) = data.nodes.iter().position(|n| n.id.trim().is_empty()) {
		return Err(LoadError::Schema {
			message: format!("node #{pos} has an empty id"),
		});
	}
	if let Some(pos) = data.edges.iter().position(|e| e.id.trim().is_empty()) {
		return Err(LoadError::Schema {
			message: format!("edge #{pos} has an empty id"),
		});
	}
	debug!("graph document passed structural validation");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINIMAL: &str = r#"{
		"meta": {"generated_at": "2025-01-01T00:00:00", "node_count": 2, "edge_count": 1,
			"label_distribution": {"Character": 2}, "archetype_counts": {},
			"mechanic_category_counts": {}},
		"nodes": [
			{"id": "character:A", "label": "Character", "properties": {"name": "A"}, "size": 2.0},
			{"id": "character:B", "label": "Character", "properties": {"name": "B"}, "size": 2.0, "x": 0.5, "y": -0.5}
		],
		"edges": [
			{"id": "edge:matchup:0", "source": "character:A", "target": "character:B",
			 "type": "STRONG_AGAINST", "properties": {"evidence": 2, "reason": "burst"}}
		],
		"indexes": {"degrees_out": {"character:A": 1}}
	}"#;

	#[test]
	fn test_parse_minimal_document() {
		let data = parse_graph(MINIMAL).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[1].x, Some(0.5));
		assert_eq!(data.indexes.degrees_out["character:A"], 1);
		assert!(data.indexes.neighbors.is_empty());
	}

	#[test]
	fn test_count_mismatch_is_schema_error() {
		let doc = MINIMAL.replace("\"node_count\": 2", "\"node_count\": 3");
		let err = parse_graph(&doc).unwrap_err();
		assert!(matches!(err, LoadError::Schema { .. }));
	}

	#[test]
	fn test_garbage_is_parse_error() {
		let err = parse_graph("<!doctype html>").unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
	}

	#[test]
	fn test_missing_sections_are_parse_errors() {
		let err = parse_graph(r#"{"nodes": [], "edges": []}"#).unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
	}
}
