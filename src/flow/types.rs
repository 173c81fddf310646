use serde::{Deserialize, Serialize};

use super::error::{FlowError, Result};

/// Producer-supplied role of a node, when the data source knows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// A raw material feeding the chain.
	Material,
	/// A processor, cell maker or OEM downstream of the materials.
	Entity,
}

/// A named endpoint in a flow graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
	/// Display name, unique within a graph.
	pub name: String,
	/// Explicit role; untagged nodes fall back to name heuristics.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<NodeKind>,
}

impl FlowNode {
	/// An untagged node.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: None,
		}
	}

	/// A node carrying an explicit role.
	pub fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
		Self {
			name: name.into(),
			kind: Some(kind),
		}
	}
}

/// A directed, weighted flow between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
	/// Name of the upstream node.
	pub source: String,
	/// Name of the downstream node.
	pub target: String,
	/// Flow quantity, never negative.
	pub value: f64,
}

impl FlowLink {
	/// Builds a link between two named nodes.
	pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			value,
		}
	}

	/// Whether either endpoint is named `name`.
	pub fn touches(&self, name: &str) -> bool {
		self.source == name || self.target == name
	}
}

/// Nodes plus the links between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
	/// Every node of the snapshot.
	#[serde(default)]
	pub nodes: Vec<FlowNode>,
	/// Every flow of the snapshot.
	#[serde(default)]
	pub links: Vec<FlowLink>,
}

impl FlowGraph {
	/// Parses the `{ nodes: [{name}], links: [{source, target, value}] }`
	/// interchange format and checks every flow value.
	pub fn from_json(json: &str) -> Result<Self> {
		let graph: FlowGraph = serde_json::from_str(json)?;
		graph.validate()?;
		Ok(graph)
	}

	/// Rejects negative or non-finite link values.
	pub fn validate(&self) -> Result<()> {
		match self
			.links
			.iter()
			.find(|l| !l.value.is_finite() || l.value < 0.0)
		{
			Some(link) => Err(FlowError::InvalidFlowValue {
				source_name: link.source.clone(),
				target_name: link.target.clone(),
				value: link.value,
			}),
			None => Ok(()),
		}
	}

	/// True when the graph has neither nodes nor links.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}

	/// Sum of every link value.
	pub fn total_value(&self) -> f64 {
		self.links.iter().map(|l| l.value).sum()
	}

	/// Looks up a node by name.
	pub fn node(&self, name: &str) -> Option<&FlowNode> {
		self.nodes.iter().find(|n| n.name == name)
	}
}
