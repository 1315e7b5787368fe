//! Explorer configuration.
//!
//! Configuration is optional. The host page may embed
//!
//! ```html
//! <script type="application/json" id="explorer-config">
//!   { "data_url": "data/graph.json", "search_debounce_ms": 150 }
//! </script>
//! ```
//!
//! and any field left out keeps its default.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::graph::path::MAX_EXPLORED_NODES;
use crate::graph::search::SEARCH_LIMIT;
use crate::graph::types::NodeLabel;

/// DOM id of the optional configuration element.
pub const CONFIG_ELEMENT_ID: &str = "explorer-config";

/// Runtime settings of the explorer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
	/// Where the graph document is fetched from.
	pub data_url: String,
	/// Maximum number of search results.
	pub search_limit: usize,
	/// Delay before a search term edit is applied.
	pub search_debounce_ms: u64,
	/// Cap on nodes visited by one path search.
	pub max_explored_nodes: usize,
	/// Labels active on load and after a reset.
	pub default_labels: Vec<NodeLabel>,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			data_url: "graph.json".to_string(),
			search_limit: SEARCH_LIMIT,
			search_debounce_ms: 200,
			max_explored_nodes: MAX_EXPLORED_NODES,
			default_labels: NodeLabel::ALL.to_vec(),
		}
	}
}

impl ExplorerConfig {
	/// Parses a JSON configuration, falling back to defaults on error.
	pub fn from_json(json: &str) -> Self {
		match serde_json::from_str::<ExplorerConfig>(json) {
			Ok(config) => config,
			Err(e) => {
				warn!("ignoring invalid explorer config: {}", e);
				Self::default()
			}
		}
	}

	/// Reads the configuration embedded in the host page, if any.
	pub fn from_document() -> Self {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|e| e.dyn_into::<HtmlScriptElement>().ok())
			.and_then(|s| s.text().ok());
		match text {
			Some(json) => {
				info!("explorer config found in page");
				Self::from_json(&json)
			}
			None => Self::default(),
		}
	}
}
