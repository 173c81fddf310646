use thiserror::Error;

/// Errors raised while loading flow data.
#[derive(Error, Debug)]
pub enum FlowError {
	/// Input was not the expected JSON shape
	#[error("Malformed flow data: {0}")]
	Json(#[from] serde_json::Error),

	/// A link carried a negative or non-finite quantity
	#[error("Invalid flow value {value} on link {source_name} -> {target_name}")]
	InvalidFlowValue {
		/// Upstream node of the offending link.
		source_name: String,
		/// Downstream node of the offending link.
		target_name: String,
		/// The rejected quantity.
		value: f64,
	},
}

/// Result alias for flow data loading.
pub type Result<T> = std::result::Result<T, FlowError>;
