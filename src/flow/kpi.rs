use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::category::{Category, MATERIAL_CATEGORIES, classify};
use super::format::{format_magnitude, percentage_of};
use super::types::{FlowGraph, FlowNode, NodeKind};

/// Integrators counted as downstream entities by exact name.
pub const KNOWN_DOWNSTREAM_ENTITIES: [&str; 10] = [
	"Tesla",
	"BYD",
	"Volkswagen",
	"CATL",
	"Panasonic",
	"LG Energy Solution",
	"Samsung SDI",
	"SK On",
	"General Motors",
	"Ford",
];

/// Name fragments that mark an untagged node as downstream.
pub const DOWNSTREAM_NAME_HINTS: [&str; 4] = ["Motors", "Automotive", "Battery", "Energy"];

/// Label shown when no material flows were seen.
pub const NO_CATEGORY: &str = "N/A";

/// Point-in-time summary of a flow graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
	/// Sum of every link value.
	pub total_volume: f64,
	/// Nodes recognised as processors, cell makers or OEMs.
	pub num_downstream_entities: usize,
	/// Material with the largest outbound volume.
	pub top_category: Option<Category>,
	/// Outbound volume per material that occurs as a link source, in
	/// priority order.
	pub category_volumes: Vec<(Category, f64)>,
	/// When the snapshot was taken.
	pub computed_at: DateTime<Utc>,
}

impl KpiSnapshot {
	/// The snapshot of a missing graph.
	pub fn zeroed() -> Self {
		Self {
			total_volume: 0.0,
			num_downstream_entities: 0,
			top_category: None,
			category_volumes: Vec::new(),
			computed_at: Utc::now(),
		}
	}

	/// `top_category` as display text, `"N/A"` when absent.
	pub fn top_category_label(&self) -> &'static str {
		self.top_category.map_or(NO_CATEGORY, Category::label)
	}

	/// Outbound volume recorded for `category`, zero if it never occurred.
	pub fn volume_of(&self, category: Category) -> f64 {
		self.category_volumes
			.iter()
			.find(|(c, _)| *c == category)
			.map_or(0.0, |(_, v)| *v)
	}

	/// `computed_at` as an ISO-8601 string with millisecond precision.
	pub fn computed_at_iso(&self) -> String {
		self.computed_at.to_rfc3339_opts(SecondsFormat::Millis, true)
	}
}

/// Whether a node sits downstream of the raw materials.
pub fn is_downstream_entity(node: &FlowNode) -> bool {
	match node.kind {
		Some(NodeKind::Entity) => true,
		Some(NodeKind::Material) => false,
		None => {
			KNOWN_DOWNSTREAM_ENTITIES.contains(&node.name.as_str())
				|| DOWNSTREAM_NAME_HINTS.iter().any(|h| node.name.contains(h))
		}
	}
}

/// Summarises `graph`.
///
/// Ties for the top category go to the earlier of Lithium, Cobalt, Nickel.
pub fn compute_kpis(graph: &FlowGraph) -> KpiSnapshot {
	let total_volume = graph.total_value();
	let num_downstream_entities = graph.nodes.iter().filter(|n| is_downstream_entity(n)).count();

	let mut volumes: [Option<f64>; 3] = [None; 3];
	for link in &graph.links {
		let category = classify(&link.source);
		if let Some(slot) = MATERIAL_CATEGORIES.iter().position(|c| *c == category) {
			*volumes[slot].get_or_insert(0.0) += link.value;
		}
	}

	let category_volumes: Vec<(Category, f64)> = MATERIAL_CATEGORIES
		.into_iter()
		.zip(volumes)
		.filter_map(|(c, v)| v.map(|v| (c, v)))
		.collect();

	let mut top: Option<(Category, f64)> = None;
	for &(category, volume) in &category_volumes {
		if top.is_none_or(|(_, best)| volume > best) {
			top = Some((category, volume));
		}
	}

	KpiSnapshot {
		total_volume,
		num_downstream_entities,
		top_category: top.map(|(c, _)| c),
		category_volumes,
		computed_at: Utc::now(),
	}
}

/// [`compute_kpis`] for a graph that may be missing.
pub fn compute_kpis_opt(graph: Option<&FlowGraph>) -> KpiSnapshot {
	graph.map_or_else(KpiSnapshot::zeroed, compute_kpis)
}

/// One-sentence reading of a snapshot for the insight panel.
pub fn insight_summary(kpis: &KpiSnapshot) -> String {
	let Some(top) = kpis.top_category else {
		return "No material flows match the current selection.".to_string();
	};
	let material_total: f64 = kpis.category_volumes.iter().map(|(_, v)| v).sum();
	let entities = match kpis.num_downstream_entities {
		1 => "1 downstream entity".to_string(),
		n => format!("{} downstream entities", n),
	};
	format!(
		"{} leads material supply with {} of {} units, feeding {}.",
		top,
		percentage_of(kpis.volume_of(top), material_total, 1),
		format_magnitude(material_total, 1),
		entities
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::flow::types::FlowLink;

	fn battery_graph() -> FlowGraph {
		FlowGraph {
			nodes: ["Lithium", "Cobalt", "Nickel", "CATL", "Tesla"]
				.into_iter()
				.map(FlowNode::new)
				.collect(),
			links: vec![
				FlowLink::new("Lithium", "CATL", 100.0),
				FlowLink::new("Cobalt", "CATL", 50.0),
				FlowLink::new("Nickel", "CATL", 75.0),
				FlowLink::new("CATL", "Tesla", 225.0),
			],
		}
	}

	#[test]
	fn test_zeroed_snapshot() {
		let kpis = compute_kpis_opt(None);
		assert_eq!(kpis.total_volume, 0.0);
		assert_eq!(kpis.num_downstream_entities, 0);
		assert_eq!(kpis.top_category_label(), "N/A");
	}

	#[test]
	fn test_empty_graph_matches_zeroed() {
		let kpis = compute_kpis(&FlowGraph::default());
		assert_eq!(kpis.total_volume, 0.0);
		assert_eq!(kpis.top_category, None);
		assert!(kpis.category_volumes.is_empty());
	}

	#[test]
	fn test_battery_graph() {
		let kpis = compute_kpis(&battery_graph());
		assert_eq!(kpis.total_volume, 450.0);
		assert_eq!(kpis.num_downstream_entities, 2);
		assert_eq!(kpis.top_category, Some(Category::Lithium));
		assert_eq!(kpis.volume_of(Category::Nickel), 75.0);
		assert_eq!(kpis.volume_of(Category::Other), 0.0);
	}

	#[test]
	fn test_volume_is_sum_of_links_regardless_of_nodes() {
		let mut graph = battery_graph();
		graph.nodes.truncate(1);
		assert_eq!(compute_kpis(&graph).total_volume, 450.0);
	}

	#[test]
	fn test_only_sources_count_towards_category() {
		let graph = FlowGraph {
			nodes: vec![],
			links: vec![
				FlowLink::new("Refinery", "Nickel Stockpile", 500.0),
				FlowLink::new("Cobalt", "Refinery", 10.0),
			],
		};
		let kpis = compute_kpis(&graph);
		assert_eq!(kpis.top_category, Some(Category::Cobalt));
		assert_eq!(kpis.category_volumes, vec![(Category::Cobalt, 10.0)]);
	}

	#[test]
	fn test_tie_breaks_by_priority() {
		let graph = FlowGraph {
			nodes: vec![],
			links: vec![
				FlowLink::new("Nickel", "Tesla", 40.0),
				FlowLink::new("Cobalt", "Tesla", 40.0),
			],
		};
		assert_eq!(compute_kpis(&graph).top_category, Some(Category::Cobalt));
	}

	#[test]
	fn test_downstream_heuristics_and_tags() {
		assert!(is_downstream_entity(&FlowNode::new("Tesla")));
		assert!(is_downstream_entity(&FlowNode::new("Rivian Automotive")));
		assert!(is_downstream_entity(&FlowNode::new("Northvolt Battery")));
		assert!(!is_downstream_entity(&FlowNode::new("Lithium")));
		assert!(!is_downstream_entity(&FlowNode::new("tesla")));
		assert!(is_downstream_entity(&FlowNode::with_kind("Refinery X", NodeKind::Entity)));
		assert!(!is_downstream_entity(&FlowNode::with_kind("Tesla", NodeKind::Material)));
	}

	#[test]
	fn test_computed_at_is_iso8601() {
		let iso = compute_kpis(&battery_graph()).computed_at_iso();
		assert!(iso.ends_with('Z'));
		assert!(DateTime::parse_from_rfc3339(&iso).is_ok());
	}

	#[test]
	fn test_insight_summary() {
		let text = insight_summary(&compute_kpis(&battery_graph()));
		assert_eq!(
			text,
			"Lithium leads material supply with 44.4% of 225 units, feeding 2 downstream entities."
		);
		assert!(insight_summary(&KpiSnapshot::zeroed()).starts_with("No material flows"));
	}
}
