//! Error types for loading the dataset.

use thiserror::Error;

/// Result type alias for dataset loading.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that make the dataset unusable. Every core operation requires a
/// successful load, so these are fatal until the page is reloaded.
#[derive(Error, Debug)]
pub enum LoadError {
	/// The request itself failed (network, CORS, missing window).
	#[error("Failed to fetch {url}: {message}")]
	Fetch {
		/// Requested URL.
		url: String,
		/// Description of the failure.
		message: String,
	},

	/// The server answered with a non-success status.
	#[error("Fetching {url} returned HTTP {status}")]
	Status {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// The body is not valid JSON for the graph document.
	#[error("Invalid graph document: {0}")]
	Parse(#[from] serde_json::Error),

	/// The document parsed but violates the graph schema.
	#[error("Graph document failed validation: {message}")]
	Schema {
		/// Description of the violation.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = LoadError::Status {
			url: "graph.json".to_string(),
			status: 404,
		};
		assert!(err.to_string().contains("graph.json"));
		assert!(err.to_string().contains("404"));

		let err = LoadError::Schema {
			message: "node_count is 3 but 2 nodes are present".to_string(),
		};
		assert!(err.to_string().contains("node_count"));
	}
}
