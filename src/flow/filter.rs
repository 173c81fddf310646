use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::category::{MATERIAL_CATEGORIES, classify};
use super::types::{FlowGraph, FlowLink, FlowNode};

/// Name of the synthetic node standing in for below-threshold flows.
pub const OTHER_NODE: &str = "Other";

/// OEMs selected when the caller does not say otherwise.
pub const DEFAULT_OEMS: [&str; 5] = ["Tesla", "BYD", "Volkswagen", "CATL", "Panasonic"];

/// Which part of the graph the caller wants to see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSelection {
	/// Category labels or literal node names.
	pub selected_materials: Vec<String>,
	/// Literal OEM node names.
	pub selected_oems: Vec<String>,
	/// Links below this share of the total flow (0-100) collapse into "Other".
	pub min_link_percent: f64,
}

impl Default for FilterSelection {
	fn default() -> Self {
		Self {
			selected_materials: MATERIAL_CATEGORIES
				.iter()
				.map(|c| c.label().to_string())
				.collect(),
			selected_oems: DEFAULT_OEMS.iter().map(|s| s.to_string()).collect(),
			min_link_percent: 0.0,
		}
	}
}

impl FilterSelection {
	/// Adds the material if absent, removes it otherwise.
	pub fn toggle_material(&mut self, material: &str) {
		toggle(&mut self.selected_materials, material);
	}

	/// Adds the OEM if absent, removes it otherwise.
	pub fn toggle_oem(&mut self, oem: &str) {
		toggle(&mut self.selected_oems, oem);
	}

	/// Whether `material` is currently selected.
	pub fn has_material(&self, material: &str) -> bool {
		self.selected_materials.iter().any(|m| m == material)
	}

	/// Whether `oem` is currently selected.
	pub fn has_oem(&self, oem: &str) -> bool {
		self.selected_oems.iter().any(|o| o == oem)
	}

	fn percent(&self) -> f64 {
		if self.min_link_percent.is_finite() {
			self.min_link_percent.clamp(0.0, 100.0)
		} else {
			0.0
		}
	}

	fn involves_material(&self, link: &FlowLink) -> bool {
		[link.source.as_str(), link.target.as_str()]
			.into_iter()
			.any(|name| self.has_material(classify(name).label()) || self.has_material(name))
	}

	fn involves_oem(&self, link: &FlowLink) -> bool {
		self.has_oem(&link.source) || self.has_oem(&link.target)
	}
}

fn toggle(list: &mut Vec<String>, item: &str) {
	if let Some(pos) = list.iter().position(|s| s == item) {
		list.remove(pos);
	} else {
		list.push(item.to_string());
	}
}

/// A filtered graph together with the volume that fell below the threshold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOutcome {
	/// The reduced graph.
	pub graph: FlowGraph,
	/// Summed value of every below-threshold link.
	pub other_value: f64,
}

/// Reduces `graph` to the flows matching `selection`.
pub fn filter_flows(graph: &FlowGraph, selection: &FilterSelection) -> FlowGraph {
	filter_flows_with_summary(graph, selection).graph
}

/// Like [`filter_flows`], also reporting the collapsed "Other" volume.
///
/// Below-threshold links are only summed: they are not re-emitted as links
/// into the "Other" node, so flow is not conserved in the output.
pub fn filter_flows_with_summary(graph: &FlowGraph, selection: &FilterSelection) -> FilterOutcome {
	if graph.is_empty() {
		return FilterOutcome {
			graph: graph.clone(),
			other_value: 0.0,
		};
	}

	let total_value = graph.total_value();
	let min_link_value = selection.percent() / 100.0 * total_value;

	let mut other_value = 0.0;
	let mut links = Vec::new();
	for link in &graph.links {
		if link.value < min_link_value {
			other_value += link.value;
			continue;
		}
		if selection.involves_material(link) && selection.involves_oem(link) {
			links.push(link.clone());
		}
	}

	let mut retained: Vec<&str> = Vec::new();
	let mut seen = HashSet::new();
	for link in &links {
		for name in [link.source.as_str(), link.target.as_str()] {
			if seen.insert(name) {
				retained.push(name);
			}
		}
	}

	let mut nodes: Vec<FlowNode> = graph
		.nodes
		.iter()
		.filter(|n| seen.contains(n.name.as_str()))
		.cloned()
		.collect();
	// endpoints the input node list forgot
	for name in retained {
		if !nodes.iter().any(|n| n.name == name) {
			nodes.push(FlowNode::new(name));
		}
	}
	if other_value > 0.0 && !nodes.iter().any(|n| n.name == OTHER_NODE) {
		nodes.push(FlowNode::new(OTHER_NODE));
	}

	debug!(
		"filtered {} -> {} links, {} nodes, other volume {}",
		graph.links.len(),
		links.len(),
		nodes.len(),
		other_value
	);

	FilterOutcome {
		graph: FlowGraph { nodes, links },
		other_value,
	}
}
